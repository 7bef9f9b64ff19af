//! Property-based tests for qubit reassignment.
//!
//! Assignment must never touch the template, and a map that sends every
//! role to itself must leave the circuit structurally unchanged.

use proptest::prelude::*;
use qlite_ir::{Circuit, QubitId, QubitMap, parse_qubit_key};

/// Generate a random template over roles `0..num_qubits`, sometimes with
/// a non-expanding sub-circuit nested inside.
fn arb_template() -> impl Strategy<Value = Circuit> {
    (2_u32..=6).prop_flat_map(|num_qubits| {
        (
            prop::collection::vec(arb_gate_op(num_qubits), 1..=12),
            prop::collection::vec(arb_gate_op(num_qubits), 0..=4),
        )
            .prop_map(|(ops, nested_ops)| {
                let mut circuit = Circuit::named("template");
                for op in ops {
                    op.apply(&mut circuit);
                }
                if !nested_ops.is_empty() {
                    let mut inner = Circuit::named("inner").with_expand(false);
                    for op in nested_ops {
                        op.apply(&mut inner);
                    }
                    let _ = circuit.append(inner);
                }
                circuit
            })
    })
}

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rz(u32, f64),
    CX(u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        match self {
            GateOp::H(q) => {
                let _ = circuit.h(QubitId(q));
            }
            GateOp::X(q) => {
                let _ = circuit.x(QubitId(q));
            }
            GateOp::Rz(q, theta) => {
                let _ = circuit.rz(QubitId(q), theta);
            }
            GateOp::CX(q1, q2) => {
                let _ = circuit.cx(QubitId(q1), QubitId(q2));
            }
        }
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        (0..num_qubits, -3.0_f64..3.0).prop_map(|(q, t)| GateOp::Rz(q, t)),
        (0..num_qubits, 1..num_qubits).prop_map(move |(c, offset)| {
            // offset in 1..n keeps target != control
            GateOp::CX(c, (c + offset) % num_qubits)
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Assignment returns a new circuit and leaves the template as it was.
    #[test]
    fn assign_does_not_mutate_template(template in arb_template(), shift in 1_u32..50) {
        let before = template.clone();
        let map: QubitMap = template
            .involved_qubits()
            .iter()
            .map(|&q| (q, QubitId(q.0 + shift)))
            .collect();

        let bound = template.assign_by_map(&map).unwrap();
        prop_assert_eq!(&template, &before);
        prop_assert_eq!(bound.len(), template.len());
        prop_assert_eq!(bound.instructions().len(), template.instructions().len());
    }

    /// The identity map reproduces every instruction.
    #[test]
    fn identity_map_preserves_instructions(template in arb_template()) {
        let map = QubitMap::identity(template.involved_qubits());
        let bound = template.assign_by_map(&map).unwrap();

        prop_assert_eq!(bound.len(), template.len());
        prop_assert_eq!(bound.instructions(), template.instructions());
        prop_assert_eq!(bound.involved_qubits(), template.involved_qubits());
        prop_assert_eq!(bound.mapping(), Some(&map));
    }

    /// Involved qubits are distinct.
    #[test]
    fn involved_qubits_are_unique(template in arb_template()) {
        let mut qubits = template.involved_qubits().to_vec();
        let len = qubits.len();
        qubits.sort();
        qubits.dedup();
        prop_assert_eq!(qubits.len(), len);
    }

    /// Dropping any role from the map is reported, not silently skipped.
    #[test]
    fn dropped_role_is_rejected(template in arb_template(), pick in any::<prop::sample::Index>()) {
        let involved = template.involved_qubits();
        let dropped = involved[pick.index(involved.len())];
        let map: QubitMap = involved
            .iter()
            .filter(|&&q| q != dropped)
            .map(|&q| (q, q))
            .collect();
        prop_assert!(template.assign_by_map(&map).is_err());
    }

    /// `q<k>` keys round-trip through the parser.
    #[test]
    fn qubit_key_parses(k in 0_u32..100_000) {
        prop_assert_eq!(parse_qubit_key(&format!("q{k}")), Some(k));
    }

    /// Keys with anything but digits after the `q` are rejected.
    #[test]
    fn qubit_key_rejects_suffix(k in 0_u32..1000, suffix in "[a-z_]{1,4}") {
        prop_assert_eq!(parse_qubit_key(&format!("q{k}{suffix}")), None);
    }
}
