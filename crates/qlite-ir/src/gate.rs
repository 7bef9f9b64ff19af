//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// Standard gates with fixed arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate.
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate.
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(Angle),
    /// Rotation around Y axis.
    Ry(Angle),
    /// Rotation around Z axis.
    Rz(Angle),
    /// Phase gate.
    P(Angle),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(Angle, Angle, Angle),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled phase gate.
    CP(Angle),
    /// Controlled rotation around Z.
    CRz(Angle),
    /// ZZ rotation gate.
    RZZ(Angle),

    // Three-qubit gates
    /// Toffoli gate.
    CCX,
    /// Fredkin gate.
    CSwap,
}

impl StandardGate {
    /// Lower-case mnemonic of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CP(_) => "cp",
            StandardGate::CRz(_) => "crz",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CP(_)
            | StandardGate::CRz(_)
            | StandardGate::RZZ(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Angles of this gate, in declaration order.
    pub fn angles(&self) -> Vec<&Angle> {
        match self {
            StandardGate::Rx(a)
            | StandardGate::Ry(a)
            | StandardGate::Rz(a)
            | StandardGate::P(a)
            | StandardGate::CP(a)
            | StandardGate::CRz(a)
            | StandardGate::RZZ(a) => vec![a],
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }

    /// Check whether any angle is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.angles().iter().any(|a| a.is_symbolic())
    }

    /// The same gate with `f` applied to every angle.
    #[must_use]
    pub fn map_angles(&self, f: impl Fn(&Angle) -> Angle) -> Self {
        match self {
            StandardGate::Rx(a) => StandardGate::Rx(f(a)),
            StandardGate::Ry(a) => StandardGate::Ry(f(a)),
            StandardGate::Rz(a) => StandardGate::Rz(f(a)),
            StandardGate::P(a) => StandardGate::P(f(a)),
            StandardGate::U(theta, phi, lambda) => StandardGate::U(f(theta), f(phi), f(lambda)),
            StandardGate::CP(a) => StandardGate::CP(f(a)),
            StandardGate::CRz(a) => StandardGate::CRz(f(a)),
            StandardGate::RZZ(a) => StandardGate::RZZ(f(a)),
            _ => self.clone(),
        }
    }
}

/// A gate defined outside the standard set, carried by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Angles of the gate.
    #[serde(default)]
    pub angles: Vec<Angle>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            angles: vec![],
        }
    }

    /// Attach angles to the gate.
    #[must_use]
    pub fn with_angles(mut self, angles: Vec<Angle>) -> Self {
        self.angles = angles;
        self
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A standard gate.
    Standard(StandardGate),
    /// A custom gate.
    Custom(CustomGate),
}

impl Gate {
    /// Name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Custom(g) => &g.name,
        }
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Custom(g) => g.num_qubits,
        }
    }

    /// Angles of this gate.
    pub fn angles(&self) -> Vec<&Angle> {
        match self {
            Gate::Standard(g) => g.angles(),
            Gate::Custom(g) => g.angles.iter().collect(),
        }
    }

    /// Replace the symbol `name` by `value` in every angle.
    #[must_use]
    pub fn bind_angle(&self, name: &str, value: f64) -> Self {
        match self {
            Gate::Standard(g) => Gate::Standard(g.map_angles(|a| a.bind(name, value))),
            Gate::Custom(g) => Gate::Custom(CustomGate {
                angles: g.angles.iter().map(|a| a.bind(name, value)).collect(),
                ..g.clone()
            }),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::Custom(gate)
    }
}
