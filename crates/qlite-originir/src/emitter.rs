//! OriginIR emitter for circuits and programs.

use qlite_ir::{
    Angle, ExportSource, Exporter, Gate, Instruction, InstructionKind, QubitId, StandardGate,
};
use tracing::debug;

use crate::config::EmitterConfig;
use crate::error::{EmitError, EmitResult};

/// Emit a circuit or program as OriginIR with the default configuration.
///
/// Circuits are flattened and sized by their highest qubit and classical
/// bit; programs use their declared sizes.
pub fn to_originir<'a>(source: impl Into<ExportSource<'a>>) -> EmitResult<String> {
    OriginIrExporter::default().emit(source.into())
}

/// [`Exporter`] producing OriginIR text.
#[derive(Debug, Clone, Default)]
pub struct OriginIrExporter {
    config: EmitterConfig,
}

impl OriginIrExporter {
    /// Create an exporter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with a validated configuration.
    pub fn with_config(config: EmitterConfig) -> EmitResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    fn emit(&self, source: ExportSource<'_>) -> EmitResult<String> {
        let mut emitter = Emitter::new(&self.config);
        match source {
            ExportSource::Circuit(circuit) => {
                let instructions = circuit.instructions();
                let num_qubits = circuit
                    .involved_qubits()
                    .iter()
                    .map(|q| q.0 + 1)
                    .max()
                    .unwrap_or(0);
                let num_clbits = instructions
                    .iter()
                    .flat_map(|inst| inst.clbits.iter())
                    .map(|c| c.0 + 1)
                    .max()
                    .unwrap_or(0);
                emitter.emit_all(num_qubits, num_clbits, instructions)
            }
            ExportSource::Program(prog) => emitter.emit_all(
                prog.num_qubits(),
                prog.num_clbits(),
                prog.instructions().iter().collect(),
            ),
        }
    }
}

impl Exporter for OriginIrExporter {
    type Error = EmitError;

    fn export(&self, source: ExportSource<'_>) -> EmitResult<String> {
        self.emit(source)
    }
}

struct Emitter<'c> {
    config: &'c EmitterConfig,
    output: String,
}

impl<'c> Emitter<'c> {
    fn new(config: &'c EmitterConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    fn emit_all(
        &mut self,
        num_qubits: u32,
        num_clbits: u32,
        instructions: Vec<&Instruction>,
    ) -> EmitResult<String> {
        debug!(
            num_qubits,
            num_clbits,
            instructions = instructions.len(),
            "emitting OriginIR"
        );
        if self.config.header {
            self.writeln(&format!("QINIT {num_qubits}"));
            self.writeln(&format!("CREG {num_clbits}"));
        }
        for instruction in instructions {
            self.emit_instruction(instruction)?;
        }
        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let qubits = &instruction.qubits;
        match &instruction.kind {
            InstructionKind::Gate(Gate::Standard(gate)) => self.emit_standard(gate, qubits)?,

            InstructionKind::Gate(Gate::Custom(custom)) => {
                if !self.config.custom_gates {
                    return Err(EmitError::UnsupportedGate(custom.name.clone()));
                }
                let angles: Vec<&Angle> = custom.angles.iter().collect();
                let line = self.gate_line(
                    &custom.name.to_ascii_uppercase(),
                    qubits,
                    &angles,
                    &custom.name,
                )?;
                self.writeln(&line);
            }

            InstructionKind::Measure => {
                for (q, c) in qubits.iter().zip(instruction.clbits.iter()) {
                    self.writeln(&format!("MEASURE q[{}],c[{}]", q.0, c.0));
                }
            }

            InstructionKind::Reset => {
                for q in qubits {
                    self.writeln(&format!("RESET q[{}]", q.0));
                }
            }

            InstructionKind::Barrier => {
                if self.config.barriers && !qubits.is_empty() {
                    let line = format!("BARRIER {}", emit_qubits(qubits));
                    self.writeln(&line);
                }
            }
        }
        Ok(())
    }

    fn emit_standard(&mut self, gate: &StandardGate, qubits: &[QubitId]) -> EmitResult<()> {
        let name = gate.name();
        let angles = gate.angles();
        let simple = |mnemonic: &str| (mnemonic.to_string(), qubits);

        // (mnemonic, operands) for gates with a direct spelling; the rest
        // are wrapped in DAGGER or CONTROL blocks
        let (mnemonic, operands) = match gate {
            StandardGate::I => simple("I"),
            StandardGate::X => simple("X"),
            StandardGate::Y => simple("Y"),
            StandardGate::Z => simple("Z"),
            StandardGate::H => simple("H"),
            StandardGate::S => simple("S"),
            StandardGate::T => simple("T"),
            StandardGate::Rx(_) => simple("RX"),
            StandardGate::Ry(_) => simple("RY"),
            StandardGate::Rz(_) => simple("RZ"),
            StandardGate::P(_) => simple("U1"),
            StandardGate::U(_, _, _) => simple("U3"),
            StandardGate::CX => simple("CNOT"),
            StandardGate::CZ => simple("CZ"),
            StandardGate::Swap => simple("SWAP"),
            StandardGate::ISwap => simple("ISWAP"),
            StandardGate::CP(_) => simple("CR"),
            StandardGate::RZZ(_) => simple("RZZ"),
            StandardGate::CCX => simple("TOFFOLI"),

            StandardGate::Sdg | StandardGate::Tdg => {
                let inner = if matches!(gate, StandardGate::Sdg) { "S" } else { "T" };
                let line = self.gate_line(inner, qubits, &[], name)?;
                self.writeln("DAGGER");
                self.writeln(&line);
                self.writeln("ENDDAGGER");
                return Ok(());
            }

            StandardGate::CY | StandardGate::CRz(_) | StandardGate::CSwap => {
                let inner = match gate {
                    StandardGate::CY => "Y",
                    StandardGate::CRz(_) => "RZ",
                    _ => "SWAP",
                };
                let (control, targets) = qubits
                    .split_first()
                    .ok_or_else(|| EmitError::UnsupportedGate(name.to_string()))?;
                let line = self.gate_line(inner, targets, &angles, name)?;
                self.writeln(&format!("CONTROL q[{}]", control.0));
                self.writeln(&line);
                self.writeln("ENDCONTROL");
                return Ok(());
            }

            StandardGate::SX | StandardGate::SXdg => {
                return Err(EmitError::UnsupportedGate(name.to_string()));
            }
        };

        let line = self.gate_line(&mnemonic, operands, &angles, name)?;
        self.writeln(&line);
        Ok(())
    }

    fn gate_line(
        &self,
        mnemonic: &str,
        qubits: &[QubitId],
        angles: &[&Angle],
        gate_name: &str,
    ) -> EmitResult<String> {
        let qubits = emit_qubits(qubits);
        if angles.is_empty() {
            return Ok(format!("{mnemonic} {qubits}"));
        }
        let angles = angles
            .iter()
            .map(|a| self.emit_angle(a, gate_name))
            .collect::<EmitResult<Vec<_>>>()?
            .join(",");
        Ok(format!("{mnemonic} {qubits},({angles})"))
    }

    fn emit_angle(&self, angle: &Angle, gate_name: &str) -> EmitResult<String> {
        let value = angle.as_f64().ok_or_else(|| EmitError::UnboundAngle {
            gate: gate_name.to_string(),
            symbols: angle.symbols().into_iter().collect::<Vec<_>>().join(", "),
        })?;
        Ok(format!("{value:.prec$}", prec = self.config.precision))
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(",")
}
