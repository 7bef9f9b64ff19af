//! qlite circuit templates
//!
//! This crate models quantum circuits as reusable templates. Qubit indices
//! used while building a [`Circuit`] are abstract roles; assigning a
//! [`QubitMap`] produces a new circuit bound to concrete qubits and leaves the
//! template as it was.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], [`ClbitId`], placeholder keys (`q<k>`) parsed by
//!   [`parse_qubit_key`], and [`check_qubit_overflow`] for fixed-size targets
//! - **Gates**: [`StandardGate`], [`CustomGate`] and symbolic [`Angle`]s
//! - **Instructions**: [`Instruction`], a gate bound to concrete qubits
//! - **Templates**: [`GateTemplate`], a gate with placeholder operands
//! - **Circuits**: [`Circuit`], with fragments, nesting and flattening
//! - **Programs**: [`QProg`], the fixed-size terminal form
//! - **Export**: the [`Exporter`] trait for external text formats
//!
//! # Example: Instantiating a Template
//!
//! ```rust
//! use qlite_ir::Circuit;
//!
//! let mut bell = Circuit::named("bell");
//! bell.h(0).unwrap().cx(0, 1).unwrap();
//!
//! let on_3_4 = bell.assign_by_list([3, 4]).unwrap();
//! let on_7_2 = bell.assign_by_keywords([("q0", 7), ("q1", 2)]).unwrap();
//!
//! assert_eq!(on_3_4.circuit_str().unwrap(), "h q[3];\ncx q[3], q[4];\n");
//! assert_eq!(on_7_2.circuit_str().unwrap(), "h q[7];\ncx q[7], q[2];\n");
//! ```
//!
//! # Example: Fragments
//!
//! ```rust
//! use qlite_ir::{Circuit, IrError};
//!
//! let mut prep = Circuit::fragment("prep");
//! prep.h(0).unwrap().cx(0, 1).unwrap();
//!
//! let mut main = Circuit::named("main");
//! // fragments must be assigned before they can be composed
//! assert!(matches!(main.append(&prep), Err(IrError::UnassignedFragment(_))));
//!
//! main.append(prep.assign_by_list([2, 3]).unwrap()).unwrap();
//! assert_eq!(main.circuit_str().unwrap(), "prep qubit_mapping: {0: 2, 1: 3};\n");
//! ```
//!
//! # Composition Rules
//!
//! | Appended value | `expand` | Result |
//! |----------------|----------|--------|
//! | [`Instruction`] | - | one new entry |
//! | bound [`GateTemplate`] | - | one new entry |
//! | unbound [`GateTemplate`] | - | [`IrError::InvalidAppendTarget`] |
//! | [`Circuit`] with `expand() == true` | any | entries flattened in |
//! | [`Circuit`] with `expand() == false` | `false` | nested as one entry |
//! | [`Circuit`] with `expand() == false` | `true` | entries flattened in |
//! | fragment | any | [`IrError::UnassignedFragment`] |

pub mod angle;
pub mod circuit;
pub mod error;
pub mod export;
pub mod gate;
pub mod instruction;
pub mod inverse;
pub mod program;
pub mod qubit;
pub mod qubit_map;
pub mod template;

pub use angle::Angle;
pub use circuit::{Appendable, Circuit, CircuitItem};
pub use error::{IrError, IrResult};
pub use export::{ExportSource, Exporter};
pub use gate::{CustomGate, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use inverse::{inverse_gate, inverse_instruction};
pub use program::QProg;
pub use qubit::{ClbitId, IntoQubit, QubitId, QubitLocator, check_qubit_overflow, parse_qubit_key};
pub use qubit_map::QubitMap;
pub use template::GateTemplate;
