//! Rotation angles, either numeric or symbolic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A gate angle.
///
/// Builder methods accept plain numbers and strings; a string becomes a
/// named symbol that stays unevaluated until bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// A numeric value in radians.
    Value(f64),
    /// A named symbolic angle.
    Symbol(String),
    /// Negation.
    Neg(Box<Angle>),
    /// Sum of two angles.
    Add(Box<Angle>, Box<Angle>),
    /// Product of two angles.
    Mul(Box<Angle>, Box<Angle>),
}

impl Angle {
    /// Numeric angle.
    pub fn value(radians: f64) -> Self {
        Angle::Value(radians)
    }

    /// Symbolic angle.
    pub fn symbol(name: impl Into<String>) -> Self {
        Angle::Symbol(name.into())
    }

    /// Check if any symbol remains in the expression.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Angle::Value(_) => false,
            Angle::Symbol(_) => true,
            Angle::Neg(a) => a.is_symbolic(),
            Angle::Add(a, b) | Angle::Mul(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Evaluate to radians if no symbol remains.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Angle::Value(v) => Some(*v),
            Angle::Symbol(_) => None,
            Angle::Neg(a) => a.as_f64().map(|v| -v),
            Angle::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            Angle::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// Names of all symbols, sorted.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_symbols(&mut set);
        set
    }

    fn collect_symbols(&self, set: &mut BTreeSet<String>) {
        match self {
            Angle::Value(_) => {}
            Angle::Symbol(name) => {
                set.insert(name.clone());
            }
            Angle::Neg(a) => a.collect_symbols(set),
            Angle::Add(a, b) | Angle::Mul(a, b) => {
                a.collect_symbols(set);
                b.collect_symbols(set);
            }
        }
    }

    /// Replace every occurrence of `name` by `value`.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            Angle::Symbol(n) if n == name => Angle::Value(value),
            Angle::Value(_) | Angle::Symbol(_) => self.clone(),
            Angle::Neg(a) => Angle::Neg(Box::new(a.bind(name, value))),
            Angle::Add(a, b) => Angle::Add(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
            Angle::Mul(a, b) => Angle::Mul(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
        }
    }

    /// The negated angle, folding numeric values and double negation.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            Angle::Value(v) => Angle::Value(-v),
            Angle::Neg(a) => (**a).clone(),
            _ => Angle::Neg(Box::new(self.clone())),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Value(v) => write!(f, "{v}"),
            Angle::Symbol(name) => write!(f, "{name}"),
            Angle::Neg(a) => match **a {
                Angle::Value(_) | Angle::Symbol(_) => write!(f, "-{a}"),
                _ => write!(f, "-({a})"),
            },
            Angle::Add(a, b) => write!(f, "({a} + {b})"),
            Angle::Mul(a, b) => write!(f, "{a}*{b}"),
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Value(value)
    }
}

impl From<i32> for Angle {
    fn from(value: i32) -> Self {
        Angle::Value(f64::from(value))
    }
}

impl From<&str> for Angle {
    fn from(name: &str) -> Self {
        Angle::Symbol(name.to_string())
    }
}

impl From<String> for Angle {
    fn from(name: String) -> Self {
        Angle::Symbol(name)
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Angle::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for Angle {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Angle::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}
