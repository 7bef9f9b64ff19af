//! Gate inversion, used to build time-reversed programs.

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};

/// Inverse of a standard gate.
///
/// Self-inverse gates map to themselves, S/T/SX to their daggers, and
/// rotations to the same rotation with the negated angle.
pub fn inverse_gate(gate: &StandardGate) -> IrResult<StandardGate> {
    let inverse = match gate {
        // Hermitian
        StandardGate::I
        | StandardGate::X
        | StandardGate::Y
        | StandardGate::Z
        | StandardGate::H
        | StandardGate::CX
        | StandardGate::CY
        | StandardGate::CZ
        | StandardGate::Swap
        | StandardGate::CCX
        | StandardGate::CSwap => gate.clone(),

        StandardGate::S => StandardGate::Sdg,
        StandardGate::Sdg => StandardGate::S,
        StandardGate::T => StandardGate::Tdg,
        StandardGate::Tdg => StandardGate::T,
        StandardGate::SX => StandardGate::SXdg,
        StandardGate::SXdg => StandardGate::SX,

        StandardGate::Rx(theta) => StandardGate::Rx(theta.negated()),
        StandardGate::Ry(theta) => StandardGate::Ry(theta.negated()),
        StandardGate::Rz(theta) => StandardGate::Rz(theta.negated()),
        StandardGate::P(lambda) => StandardGate::P(lambda.negated()),
        StandardGate::CP(lambda) => StandardGate::CP(lambda.negated()),
        StandardGate::CRz(theta) => StandardGate::CRz(theta.negated()),
        StandardGate::RZZ(theta) => StandardGate::RZZ(theta.negated()),

        // U(θ, φ, λ)† = U(-θ, -λ, -φ)
        StandardGate::U(theta, phi, lambda) => {
            StandardGate::U(theta.negated(), lambda.negated(), phi.negated())
        }

        // iSWAP† is not in the gate set.
        StandardGate::ISwap => return Err(IrError::NonInvertibleGate("iswap".into())),
    };
    Ok(inverse)
}

/// Inverse of a single instruction.
///
/// Barriers invert to themselves; measurement and reset have no inverse.
pub fn inverse_instruction(instruction: &Instruction) -> IrResult<Instruction> {
    match &instruction.kind {
        InstructionKind::Gate(Gate::Standard(gate)) => Ok(Instruction {
            kind: InstructionKind::Gate(Gate::Standard(inverse_gate(gate)?)),
            qubits: instruction.qubits.clone(),
            clbits: instruction.clbits.clone(),
        }),
        InstructionKind::Gate(Gate::Custom(custom)) => {
            Err(IrError::NonInvertibleGate(custom.name.clone()))
        }
        InstructionKind::Barrier => Ok(instruction.clone()),
        InstructionKind::Measure => Err(IrError::MeasuredCircuitInversion),
        InstructionKind::Reset => Err(IrError::NonInvertibleGate("reset".into())),
    }
}
