//! Qubit identifiers, placeholder keys and bound checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};

/// Index of a qubit within a circuit.
///
/// In a template circuit the index is an abstract role; assignment maps it to
/// another index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl TryFrom<i64> for QubitId {
    type Error = IrError;

    fn try_from(id: i64) -> IrResult<Self> {
        u32::try_from(id)
            .map(QubitId)
            .map_err(|_| IrError::InvalidQubitIndex(id))
    }
}

/// Index of a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c[{}]", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// Parse a placeholder key of the form `q<int>`.
///
/// Returns `None` for anything else, including `"q"`, `"qx"`, `"3q"` and
/// signed suffixes.
pub fn parse_qubit_key(key: &str) -> Option<u32> {
    let digits = key.strip_prefix('q')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Check that every qubit is strictly below `n`.
///
/// Returns `false` on overflow and leaves the reaction to the caller.
pub fn check_qubit_overflow(qubits: &[QubitId], n: u32) -> bool {
    qubits.iter().all(|q| q.0 < n)
}

/// A gate operand that is either a concrete qubit or a placeholder slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitLocator {
    /// A concrete qubit index.
    Fixed(QubitId),
    /// An unassigned placeholder `q<k>`.
    Slot(u32),
}

impl QubitLocator {
    /// Placeholder for role `k`.
    pub fn slot(k: u32) -> Self {
        QubitLocator::Slot(k)
    }

    /// Check whether this operand still needs assignment.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, QubitLocator::Slot(_))
    }
}

impl fmt::Display for QubitLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitLocator::Fixed(q) => write!(f, "{q}"),
            QubitLocator::Slot(k) => write!(f, "{{q{k}}}"),
        }
    }
}

impl From<QubitId> for QubitLocator {
    fn from(q: QubitId) -> Self {
        QubitLocator::Fixed(q)
    }
}

impl From<u32> for QubitLocator {
    fn from(q: u32) -> Self {
        QubitLocator::Fixed(QubitId(q))
    }
}

impl FromStr for QubitLocator {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        let s = s.trim();
        if let Some(k) = parse_qubit_key(s) {
            return Ok(QubitLocator::Slot(k));
        }
        s.parse::<u32>()
            .map(|q| QubitLocator::Fixed(QubitId(q)))
            .map_err(|_| IrError::MalformedQubitKey {
                key: s.to_string(),
                value: None,
            })
    }
}

/// Conversion into a concrete qubit for the circuit builder methods.
///
/// A placeholder key `q<k>` names circuit role `k`, which is the same index
/// space that assignment maps over.
pub trait IntoQubit {
    /// Resolve to a qubit index.
    fn into_qubit(self) -> IrResult<QubitId>;
}

impl IntoQubit for QubitId {
    fn into_qubit(self) -> IrResult<QubitId> {
        Ok(self)
    }
}

impl IntoQubit for u32 {
    fn into_qubit(self) -> IrResult<QubitId> {
        Ok(QubitId(self))
    }
}

impl IntoQubit for i32 {
    fn into_qubit(self) -> IrResult<QubitId> {
        QubitId::try_from(i64::from(self))
    }
}

impl IntoQubit for usize {
    fn into_qubit(self) -> IrResult<QubitId> {
        u32::try_from(self)
            .map(QubitId)
            .map_err(|_| IrError::InvalidQubitIndex(i64::try_from(self).unwrap_or(i64::MAX)))
    }
}

impl IntoQubit for QubitLocator {
    fn into_qubit(self) -> IrResult<QubitId> {
        match self {
            QubitLocator::Fixed(q) => Ok(q),
            QubitLocator::Slot(k) => Ok(QubitId(k)),
        }
    }
}

impl IntoQubit for &str {
    fn into_qubit(self) -> IrResult<QubitId> {
        parse_qubit_key(self)
            .map(QubitId)
            .ok_or_else(|| IrError::MalformedQubitKey {
                key: self.to_string(),
                value: None,
            })
    }
}
