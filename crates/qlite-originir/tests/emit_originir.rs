//! Integration tests for OriginIR output of assigned templates.

use proptest::prelude::*;
use qlite_ir::{Circuit, ClbitId, Exporter, QProg, QubitId};
use qlite_originir::{EmitterConfig, OriginIrExporter, to_originir};

#[test]
fn test_assigned_template_exact_output() {
    let mut c = Circuit::new();
    c.rx(0, 1.57).unwrap();
    c.ry(1, 2.5).unwrap();

    let bound = c.assign_by_keywords([("q0", 5), ("q1", 6)]).unwrap();
    let prog = QProg::from_circuit(&bound, 7, 0).unwrap();

    assert_eq!(
        to_originir(&prog).unwrap(),
        "QINIT 7\nCREG 0\nRX q[5],(1.570000)\nRY q[6],(2.500000)\n"
    );
}

#[test]
fn test_nested_fragment_is_flattened() {
    let mut prep = Circuit::fragment("prep");
    prep.h(0).unwrap().cx(0, 1).unwrap();

    let mut main = Circuit::named("main");
    main.append(prep.assign_by_list([1, 2]).unwrap()).unwrap();
    main.measure(2, ClbitId(0)).unwrap();

    assert_eq!(
        to_originir(&main).unwrap(),
        "QINIT 3\nCREG 1\nH q[1]\nCNOT q[1],q[2]\nMEASURE q[2],c[0]\n"
    );
}

#[test]
fn test_dagger_program_output() {
    let mut c = Circuit::new();
    c.s(0).unwrap().cp(0, 1, 0.25).unwrap();
    let prog = QProg::from_circuit(&c, 2, 0).unwrap().dagger().unwrap();

    let exporter = OriginIrExporter::new();
    assert_eq!(
        exporter.export((&prog).into()).unwrap(),
        "QINIT 2\nCREG 0\nCR q[0],q[1],(-0.250000)\nDAGGER\nS q[0]\nENDDAGGER\n"
    );
}

#[test]
fn test_symbolic_template_after_binding() {
    let mut ansatz = Circuit::named("ansatz");
    ansatz.ry(0, "theta").unwrap().cx(0, 1).unwrap().rz(1, "phi").unwrap();
    assert!(to_originir(&ansatz).is_err());

    let bound = ansatz
        .assign_by_list([2, 3])
        .unwrap()
        .bind_angles([("theta", 0.5), ("phi", -1.25)]);
    assert_eq!(
        to_originir(&bound).unwrap(),
        "QINIT 4\nCREG 0\nRY q[2],(0.500000)\nCNOT q[2],q[3]\nRZ q[3],(-1.250000)\n"
    );
}

#[test]
fn test_config_from_yaml() {
    let config = EmitterConfig::from_yaml_str("precision: 3\nheader: false\n").unwrap();
    let exporter = OriginIrExporter::with_config(config).unwrap();

    let mut c = Circuit::new();
    c.rz(0, 0.125).unwrap();
    assert_eq!(c.export_with(&exporter).unwrap(), "RZ q[0],(0.125)\n");
}

// ============================================================================
// Properties
// ============================================================================

fn arb_ladder() -> impl Strategy<Value = (Circuit, u32)> {
    (2_u32..=8, 1_usize..=20).prop_map(|(num_qubits, depth)| {
        let mut c = Circuit::new();
        for layer in 0..depth {
            let q = u32::try_from(layer).unwrap() % num_qubits;
            c.h(QubitId(q)).unwrap();
            c.cx(QubitId(q), QubitId((q + 1) % num_qubits)).unwrap();
        }
        (c, num_qubits)
    })
}

proptest! {
    /// One line per instruction plus the two header lines.
    #[test]
    fn line_count_matches_instructions((circuit, _n) in arb_ladder()) {
        let text = to_originir(&circuit).unwrap();
        prop_assert_eq!(text.lines().count(), circuit.instructions().len() + 2);
    }

    /// Reassignment shifts every operand in the output.
    #[test]
    fn assignment_shows_in_output((circuit, n) in arb_ladder(), shift in 1_u32..20) {
        let bound = circuit
            .assign_by_list((0..n).map(|q| q + shift))
            .unwrap();
        let text = to_originir(&bound).unwrap();
        for q in 0..shift {
            let needle = format!("q[{q}]");
            prop_assert!(!text.contains(&needle));
        }
    }
}
