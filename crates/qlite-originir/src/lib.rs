//! OriginIR exporter for qlite
//!
//! Serializes [`qlite_ir::Circuit`] and [`qlite_ir::QProg`] values as OriginIR
//! text. Nested sub-circuits are flattened; gates without a native OriginIR
//! mnemonic are written as `DAGGER` or `CONTROL` blocks.
//!
//! # Gate Spelling
//!
//! | Gate | OriginIR |
//! |------|----------|
//! | `h`, `x`, `y`, `z`, `s`, `t`, `id` | `H q[0]`, ... |
//! | `rx`, `ry`, `rz` | `RX q[0],(1.570000)` |
//! | `p`, `u` | `U1`, `U3` |
//! | `cx`, `cz`, `swap`, `iswap` | `CNOT q[0],q[1]`, ... |
//! | `cp`, `rzz`, `ccx` | `CR`, `RZZ`, `TOFFOLI` |
//! | `sdg`, `tdg` | `DAGGER` block |
//! | `cy`, `crz`, `cswap` | `CONTROL` block |
//! | `measure` | `MEASURE q[0],c[0]` |
//!
//! # Example
//!
//! ```rust
//! use qlite_ir::{Circuit, ClbitId};
//! use qlite_originir::to_originir;
//!
//! let mut bell = Circuit::named("bell");
//! bell.h(0).unwrap().cx(0, 1).unwrap();
//! bell.measure(0, ClbitId(0)).unwrap();
//!
//! let text = to_originir(&bell).unwrap();
//! assert_eq!(text, "QINIT 2\nCREG 1\nH q[0]\nCNOT q[0],q[1]\nMEASURE q[0],c[0]\n");
//! ```

mod config;
mod emitter;
mod error;

pub use config::{ConfigError, EmitterConfig, MAX_PRECISION};
pub use emitter::{OriginIrExporter, to_originir};
pub use error::{EmitError, EmitResult};
