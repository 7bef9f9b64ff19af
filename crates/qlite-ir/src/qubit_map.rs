//! Qubit maps: from template roles to concrete qubits.
//!
//! All assignment conventions end up as a [`QubitMap`]:
//!
//! - by list: position `i` maps to the `i`-th value ([`QubitMap::from_list`])
//! - by keyword: `q<k>=<int>` pairs ([`QubitMap::from_keywords`], or parsed
//!   from text such as `"q0=5, q1=6"`)
//! - by explicit pairs ([`QubitMap::from_iter`])

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::{IntoQubit, QubitId, parse_qubit_key};

/// Keyword reserved for sizing logic; never a qubit assignment.
pub const RESERVED_SIZE_KEY: &str = "n_qubit";

/// A mapping from template qubit roles to target qubits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(QubitId, QubitId)>", into = "Vec<(QubitId, QubitId)>")]
pub struct QubitMap(BTreeMap<QubitId, QubitId>);

impl QubitMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map role `i` to `values[i]`.
    pub fn from_list<I, T>(values: I) -> IrResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoQubit,
    {
        let mut map = Self::new();
        for (i, value) in values.into_iter().enumerate() {
            let role = u32::try_from(i).map_err(|_| IrError::InvalidQubitIndex(i64::MAX))?;
            map.insert(QubitId(role), value.into_qubit()?);
        }
        if map.is_empty() {
            return Err(IrError::EmptyArguments);
        }
        Ok(map)
    }

    /// Build a map from `q<k>=<int>` keyword pairs.
    ///
    /// The reserved `n_qubit` keyword is skipped; any other key may appear
    /// only once.
    pub fn from_keywords<I, K>(pairs: I) -> IrResult<Self>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            if key == RESERVED_SIZE_KEY {
                continue;
            }
            let role = parse_qubit_key(key).ok_or_else(|| IrError::MalformedQubitKey {
                key: key.to_string(),
                value: None,
            })?;
            let target = QubitId::try_from(value).map_err(|_| IrError::MalformedQubitKey {
                key: key.to_string(),
                value: Some(value.to_string()),
            })?;
            if map.insert(QubitId(role), target).is_some() {
                return Err(IrError::DuplicateQubitKey(key.to_string()));
            }
        }
        if map.is_empty() {
            return Err(IrError::EmptyArguments);
        }
        Ok(map)
    }

    /// Map every qubit to itself.
    pub fn identity(qubits: &[QubitId]) -> Self {
        qubits.iter().map(|&q| (q, q)).collect()
    }

    /// Insert one assignment, returning the previous target of `role`.
    pub fn insert(&mut self, role: QubitId, target: QubitId) -> Option<QubitId> {
        self.0.insert(role, target)
    }

    /// Target of `role`, if assigned.
    pub fn get(&self, role: QubitId) -> Option<QubitId> {
        self.0.get(&role).copied()
    }

    /// Check whether `role` is assigned.
    pub fn contains(&self, role: QubitId) -> bool {
        self.0.contains_key(&role)
    }

    /// Roles of `qubits` that this map leaves unassigned.
    pub fn missing(&self, qubits: &[QubitId]) -> Vec<QubitId> {
        qubits.iter().copied().filter(|&q| !self.contains(q)).collect()
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the map has no assignments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(role, target)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, QubitId)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(QubitId, QubitId)> for QubitMap {
    fn from_iter<I: IntoIterator<Item = (QubitId, QubitId)>>(iter: I) -> Self {
        QubitMap(iter.into_iter().collect())
    }
}

impl From<Vec<(QubitId, QubitId)>> for QubitMap {
    fn from(pairs: Vec<(QubitId, QubitId)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<QubitMap> for Vec<(QubitId, QubitId)> {
    fn from(map: QubitMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl FromStr for QubitMap {
    type Err = IrError;

    /// Parse keyword text such as `"q0=5, q1=6"`.
    fn from_str(s: &str) -> IrResult<Self> {
        let mut pairs = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| IrError::MalformedQubitKey {
                    key: part.to_string(),
                    value: None,
                })?;
            let (key, value) = (key.trim(), value.trim());
            let value = value
                .parse::<i64>()
                .map_err(|_| IrError::MalformedQubitKey {
                    key: key.to_string(),
                    value: Some(value.to_string()),
                })?;
            pairs.push((key, value));
        }
        Self::from_keywords(pairs)
    }
}

impl fmt::Display for QubitMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (role, target)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", role.0, target.0)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list() {
        let map = QubitMap::from_list([3, 1, 2]).unwrap();
        assert_eq!(map.get(QubitId(0)), Some(QubitId(3)));
        assert_eq!(map.get(QubitId(2)), Some(QubitId(2)));
        assert_eq!(map.len(), 3);

        let empty: [u32; 0] = [];
        assert!(matches!(
            QubitMap::from_list(empty),
            Err(IrError::EmptyArguments)
        ));
    }

    #[test]
    fn test_from_keywords() {
        let map = QubitMap::from_keywords([("q0", 5), ("q1", 6), ("n_qubit", 10)]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(QubitId(1)), Some(QubitId(6)));
    }

    #[test]
    fn test_keyword_errors() {
        let err = QubitMap::from_keywords([("x0", 5)]).unwrap_err();
        assert!(err.to_string().contains("x0"));

        let err = QubitMap::from_keywords([("q0", -2)]).unwrap_err();
        match err {
            IrError::MalformedQubitKey { key, value } => {
                assert_eq!(key, "q0");
                assert_eq!(value.as_deref(), Some("-2"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            QubitMap::from_keywords([("n_qubit", 3)]),
            Err(IrError::EmptyArguments)
        ));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = QubitMap::from_keywords([("q0", 1), ("q0", 2)]).unwrap_err();
        assert!(matches!(&err, IrError::DuplicateQubitKey(key) if key == "q0"));

        assert!(matches!(
            "q0=1, q1=3, q0=2".parse::<QubitMap>(),
            Err(IrError::DuplicateQubitKey(_))
        ));
        // the reserved size key is skipped, not counted
        let map = QubitMap::from_keywords([("n_qubit", 2), ("n_qubit", 3), ("q0", 1)]).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_from_str() {
        let map: QubitMap = "q0=5, q1 = 6".parse().unwrap();
        assert_eq!(map.to_string(), "{0: 5, 1: 6}");

        let err = "q0=five".parse::<QubitMap>().unwrap_err();
        assert!(err.to_string().contains("five"));
        assert!("q0".parse::<QubitMap>().is_err());
    }

    #[test]
    fn test_missing() {
        let map: QubitMap = "q0=5, q1=6".parse().unwrap();
        let qubits = [QubitId(0), QubitId(1), QubitId(2)];
        assert_eq!(map.missing(&qubits), vec![QubitId(2)]);
    }
}
