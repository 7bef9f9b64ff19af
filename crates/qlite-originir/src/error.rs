//! Error types for the OriginIR exporter.

use qlite_ir::IrError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while emitting OriginIR.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The gate has no OriginIR spelling.
    #[error("Gate '{0}' is not supported by OriginIR")]
    UnsupportedGate(String),

    /// An angle still contains unbound symbols.
    #[error("Gate '{gate}' has unbound angle symbols: {symbols}")]
    UnboundAngle {
        /// Name of the gate.
        gate: String,
        /// Comma-separated symbol names.
        symbols: String,
    },

    /// Error from the circuit model.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Invalid emitter configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for emitting.
pub type EmitResult<T> = Result<T, EmitError>;
