//! Gate templates: gates whose operands may be placeholder slots.
//!
//! A template is bound slot by slot. Partial assignment yields another
//! template; once every slot is filled, [`GateTemplate::bind`] produces an
//! [`Instruction`] that can be appended to a circuit.
//!
//! ```rust
//! use qlite_ir::{GateTemplate, QubitLocator, StandardGate};
//!
//! let toffoli = GateTemplate::new(
//!     StandardGate::CCX,
//!     [QubitLocator::slot(1), QubitLocator::slot(2), QubitLocator::slot(3)],
//! )
//! .unwrap();
//!
//! let fixed_1 = toffoli.assign_by_keywords([("q1", 1)]).unwrap();
//! assert!(!fixed_1.is_bound());
//!
//! let gate = fixed_1
//!     .assign_by_keywords([("q2", 2), ("q3", 3)])
//!     .unwrap()
//!     .bind()
//!     .unwrap();
//! assert_eq!(gate.to_string(), "ccx q[1], q[2], q[3]");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::Instruction;
use crate::qubit::{QubitId, QubitLocator};
use crate::qubit_map::QubitMap;

/// A gate with possibly unassigned operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateTemplate {
    gate: Gate,
    operands: Vec<QubitLocator>,
}

impl GateTemplate {
    /// Create a template, checking the gate's arity.
    pub fn new<I, L>(gate: impl Into<Gate>, operands: I) -> IrResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<QubitLocator>,
    {
        let gate = gate.into();
        let operands: Vec<QubitLocator> = operands.into_iter().map(Into::into).collect();
        if operands.len() != gate.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: u32::try_from(operands.len()).unwrap_or(u32::MAX),
            });
        }
        Ok(Self { gate, operands })
    }

    /// The gate this template applies.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Operands, fixed or placeholder.
    pub fn operands(&self) -> &[QubitLocator] {
        &self.operands
    }

    /// Open placeholder slots, first occurrence order.
    pub fn placeholders(&self) -> Vec<u32> {
        let mut slots = Vec::new();
        for op in &self.operands {
            match op {
                QubitLocator::Slot(k) if !slots.contains(k) => slots.push(*k),
                _ => {}
            }
        }
        slots
    }

    /// Check if every operand is a concrete qubit.
    pub fn is_bound(&self) -> bool {
        !self.operands.iter().any(QubitLocator::is_placeholder)
    }

    /// Fill the slots covered by `map`; other slots stay open.
    #[must_use]
    pub fn assign_by_map(&self, map: &QubitMap) -> Self {
        let operands = self
            .operands
            .iter()
            .map(|op| match *op {
                QubitLocator::Slot(k) => map
                    .get(QubitId(k))
                    .map_or(*op, QubitLocator::Fixed),
                QubitLocator::Fixed(_) => *op,
            })
            .collect();
        Self {
            gate: self.gate.clone(),
            operands,
        }
    }

    /// Fill slots from `q<k>=<int>` keyword pairs.
    pub fn assign_by_keywords<I, K>(&self, pairs: I) -> IrResult<Self>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let map = QubitMap::from_keywords(pairs)?;
        Ok(self.assign_by_map(&map))
    }

    /// Convert into a bound instruction.
    pub fn bind(&self) -> IrResult<Instruction> {
        let qubits = self
            .operands
            .iter()
            .map(|op| match *op {
                QubitLocator::Fixed(q) => Ok(q),
                QubitLocator::Slot(slot) => Err(IrError::UnboundPlaceholder {
                    gate: self.gate.name().to_string(),
                    slot,
                }),
            })
            .collect::<IrResult<Vec<_>>>()?;
        Instruction::gate(self.gate.clone(), qubits)
    }
}

impl fmt::Display for GateTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self
            .operands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let angles = self.gate.angles();
        if angles.is_empty() {
            write!(f, "{} {operands}", self.gate.name())
        } else {
            let angles = angles
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "{}({angles}) {operands}", self.gate.name())
        }
    }
}
