//! Fixed-size programs: the terminal, non-template circuit form.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::inverse::inverse_instruction;
use crate::qubit::{QubitId, check_qubit_overflow};

/// A flat program over a fixed number of qubits and classical bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QProg {
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
    has_measure: bool,
}

impl Default for QProg {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl QProg {
    /// Create an empty program.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        if num_qubits == 0 && num_clbits == 0 {
            warn!("A completely empty circuit instance is created (n_qubit = n_cbit = 0)");
        }
        Self {
            num_qubits,
            num_clbits,
            instructions: vec![],
            has_measure: false,
        }
    }

    /// Build a program from a circuit, flattening nested entries.
    ///
    /// Every instruction goes through [`QProg::append_checked`].
    pub fn from_circuit(circuit: &Circuit, num_qubits: u32, num_clbits: u32) -> IrResult<Self> {
        let mut prog = Self::new(num_qubits, num_clbits);
        for inst in circuit.instructions() {
            prog.append_checked(inst.clone())?;
        }
        Ok(prog)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Check if a measurement has been appended.
    pub fn has_measure(&self) -> bool {
        self.has_measure
    }

    /// Append without bounds checks.
    pub fn append(&mut self, instruction: Instruction) -> &mut Self {
        if instruction.is_measure() {
            self.has_measure = true;
        }
        self.instructions.push(instruction);
        self
    }

    /// Append after checking every qubit fits the program.
    pub fn append_checked(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        if !check_qubit_overflow(&instruction.qubits, self.num_qubits) {
            let qubit = instruction
                .qubits
                .iter()
                .copied()
                .find(|q| q.0 >= self.num_qubits)
                .unwrap_or(QubitId(self.num_qubits));
            return Err(IrError::QubitOverflow {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(self.append(instruction))
    }

    /// The time-reversed program with every gate inverted.
    ///
    /// Fails once any measurement has been appended.
    pub fn dagger(&self) -> IrResult<QProg> {
        if self.has_measure {
            return Err(IrError::MeasuredCircuitInversion);
        }
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(inverse_instruction)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
            has_measure: false,
        })
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for QProg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} qubits", self.num_qubits)?;
        writeln!(f, "{} cbits", self.num_clbits)?;
        writeln!(f, "{} gates", self.instructions.len())
    }
}
