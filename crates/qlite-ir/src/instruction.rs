//! Bound instructions: gates and non-unitary operations with concrete operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};
use crate::qubit_map::QubitMap;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement into classical bits.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (measure only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction, checking the gate's arity.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let gate = gate.into();
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: u32::try_from(qubits.len()).unwrap_or(u32::MAX),
            });
        }
        Ok(Self {
            kind: InstructionKind::Gate(gate),
            qubits,
            clbits: vec![],
        })
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> IrResult<Self> {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<Self> {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Qubits this instruction touches, in operand order.
    pub fn involved_qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Return a copy with every qubit replaced through `map`.
    ///
    /// Classical bits are left untouched.
    pub fn assign_by_map(&self, map: &QubitMap) -> IrResult<Self> {
        let missing = map.missing(&self.qubits);
        if !missing.is_empty() {
            return Err(IrError::IncompleteQubitMap {
                expected: self.qubits.clone(),
                given: map.to_string(),
                missing,
            });
        }
        Ok(Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().filter_map(|&q| map.get(q)).collect(),
            clbits: self.clbits.clone(),
        })
    }

    /// Return a copy with the angle symbol `name` bound to `value`.
    #[must_use]
    pub fn bind_angle(&self, name: &str, value: f64) -> Self {
        let kind = match &self.kind {
            InstructionKind::Gate(gate) => InstructionKind::Gate(gate.bind_angle(name, value)),
            other => other.clone(),
        };
        Self {
            kind,
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits = join(&self.qubits);
        match &self.kind {
            InstructionKind::Gate(gate) => {
                let angles = gate.angles();
                if angles.is_empty() {
                    write!(f, "{} {qubits}", gate.name())
                } else {
                    write!(f, "{}({}) {qubits}", gate.name(), join(&angles))
                }
            }
            InstructionKind::Measure => write!(f, "measure {qubits} -> {}", join(&self.clbits)),
            InstructionKind::Reset => write!(f, "reset {qubits}"),
            InstructionKind::Barrier => write!(f, "barrier {qubits}"),
        }
    }
}
