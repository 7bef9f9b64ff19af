//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A keyword assignment does not follow the `q<int>=<int>` convention.
    #[error(
        "Input must be q+integer=integer style (e.g. q1=1). Got key '{key}'{}",
        format_value_context(.value)
    )]
    MalformedQubitKey {
        /// The offending key.
        key: String,
        /// The offending value, if the key itself was well formed.
        value: Option<String>,
    },

    /// The same placeholder key was assigned more than once.
    #[error("Qubit key '{0}' is assigned more than once")]
    DuplicateQubitKey(String),

    /// A qubit index is negative or does not fit a qubit id.
    #[error("Invalid qubit index {0}")]
    InvalidQubitIndex(i64),

    /// The qubit map does not cover every qubit involved in the circuit.
    #[error(
        "Qubit map does not cover all involved qubits. Expect: {}, Get: {given}, Missing: {}",
        format_qubits(.expected),
        format_qubits(.missing)
    )]
    IncompleteQubitMap {
        /// Qubits involved in the circuit.
        expected: Vec<QubitId>,
        /// Rendered form of the map that was supplied.
        given: String,
        /// Involved qubits absent from the map.
        missing: Vec<QubitId>,
    },

    /// The value cannot be appended to a circuit.
    #[error("Cannot append to circuit: {0}")]
    InvalidAppendTarget(String),

    /// A fragment was appended before its qubits were assigned.
    #[error("Append a fragment circuit '{0}' without assigning qubits")]
    UnassignedFragment(String),

    /// A fragment without a name was rendered.
    #[error("Unexpected noname fragment")]
    UnnamedFragment,

    /// Inversion was requested on a program containing measurements.
    #[error("Cannot inverse a classical-involved circuit")]
    MeasuredCircuitInversion,

    /// Qubit-map construction received no usable arguments.
    #[error("No qubit assignment given")]
    EmptyArguments,

    /// A gate template still has an unassigned placeholder slot.
    #[error("Gate '{gate}' has unassigned placeholder q{slot}")]
    UnboundPlaceholder {
        /// Name of the gate.
        gate: String,
        /// The open placeholder slot.
        slot: u32,
    },

    /// A qubit index exceeds the size of a fixed-size program.
    #[error("Qubit {qubit} exceeds program size of {num_qubits} qubits")]
    QubitOverflow {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the program.
        num_qubits: u32,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// The gate has no known inverse.
    #[error("Gate {0} cannot be inverted")]
    NonInvertibleGate(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn format_value_context(value: &Option<String>) -> String {
    match value {
        Some(value) => format!(", assigned qubit '{value}'"),
        None => String::new(),
    }
}

fn format_qubits(qubits: &[QubitId]) -> String {
    let inner = qubits
        .iter()
        .map(|q| q.0.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
