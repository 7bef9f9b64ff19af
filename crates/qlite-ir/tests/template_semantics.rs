//! Integration tests for template assignment and composition.

use qlite_ir::{Circuit, CircuitItem, ClbitId, IrError, QProg, QubitId, QubitMap};

// ============================================================================
// End-to-end: build, assign, render
// ============================================================================

#[test]
fn test_rotation_template_rebinds_in_order() {
    let mut c = Circuit::new();
    c.rx(0, 1.57).unwrap();
    c.ry(1, 2.5).unwrap();

    let bound = c.assign_by_keywords([("q0", 5), ("q1", 6)]).unwrap();
    let text = bound.render().unwrap();
    assert_eq!(text, "rx(1.57) q[5];\nry(2.5) q[6];\n");

    // template still on its roles
    assert_eq!(c.render().unwrap(), "rx(1.57) q[0];\nry(2.5) q[1];\n");
}

#[test]
fn test_partial_reuse_as_sub_template() {
    // A three-role template bound twice into a larger circuit.
    let mut ladder = Circuit::named("ladder");
    ladder.cx(0, 1).unwrap().cx(1, 2).unwrap();

    let mut host = Circuit::named("host");
    host.append(ladder.assign_by_list([0, 1, 2]).unwrap()).unwrap();
    host.append(ladder.assign_by_list([3, 4, 5]).unwrap()).unwrap();

    // assigned plain circuits are expandable, so they flatten
    assert_eq!(host.len(), 4);
    assert_eq!(
        host.involved_qubits(),
        &[0, 1, 2, 3, 4, 5].map(QubitId)
    );
}

#[test]
fn test_fragment_instances_stay_nested() {
    let mut oracle = Circuit::fragment("oracle");
    oracle.cz(0, 1).unwrap();

    let mut host = Circuit::named("host");
    host.h(0).unwrap().h(1).unwrap().h(2).unwrap();
    host.append(oracle.assign_by_list([0, 1]).unwrap()).unwrap();
    host.append(oracle.assign_by_list([1, 2]).unwrap()).unwrap();

    assert_eq!(host.len(), 5);
    let nested = host
        .items()
        .iter()
        .filter(|item| matches!(item, CircuitItem::Circuit(_)))
        .count();
    assert_eq!(nested, 2);
    assert_eq!(
        host.circuit_str().unwrap(),
        "h q[0];\nh q[1];\nh q[2];\n\
         oracle qubit_mapping: {0: 0, 1: 1};\n\
         oracle qubit_mapping: {0: 1, 1: 2};\n"
    );

    // a bound fragment can be re-bound as part of its host
    let moved = host.assign_by_list([10, 11, 12]).unwrap();
    assert_eq!(
        moved.circuit_str().unwrap(),
        "h q[10];\nh q[11];\nh q[12];\n\
         oracle qubit_mapping: {0: 10, 1: 11};\n\
         oracle qubit_mapping: {0: 11, 1: 12};\n"
    );
    let flat: Vec<String> = moved
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        flat,
        vec![
            "h q[10]",
            "h q[11]",
            "h q[12]",
            "cz q[10], q[11]",
            "cz q[11], q[12]"
        ]
    );
}

#[test]
fn test_fragment_block_render() {
    let mut frag = Circuit::fragment("swap_test");
    frag.h(0).unwrap().cswap(0, 1, 2).unwrap().h(0).unwrap();
    let text = frag.render().unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("---   Fragment swap_test    ---"));
    assert_eq!(lines.next(), Some("h q[0];"));
    assert_eq!(lines.next(), Some("cswap q[0], q[1], q[2];"));
    assert_eq!(lines.next(), Some("h q[0];"));
    assert_eq!(lines.next(), None);
}

// ============================================================================
// Error paths leave the circuit unchanged
// ============================================================================

#[test]
fn test_incomplete_map_names_missing_qubit() {
    let mut c = Circuit::new();
    c.h(0).unwrap().h(1).unwrap().h(2).unwrap();

    let map: QubitMap = [(QubitId(0), QubitId(5)), (QubitId(1), QubitId(6))]
        .into_iter()
        .collect();
    let err = c.assign_by_map(&map).unwrap_err();
    assert!(matches!(err, IrError::IncompleteQubitMap { .. }));
    let message = err.to_string();
    assert!(message.contains("Expect: [0, 1, 2]"), "{message}");
    assert!(message.contains("Missing: [2]"), "{message}");
}

#[test]
fn test_malformed_keywords() {
    let mut c = Circuit::new();
    c.x(0).unwrap();

    let err = c.assign_by_keywords([("qubit0", 1)]).unwrap_err();
    assert!(err.to_string().contains("qubit0"));

    let err = c.assign_by_keywords([("q0", -1)]).unwrap_err();
    assert!(err.to_string().contains("-1"));

    // n_qubit alone leaves nothing to assign
    assert!(matches!(
        c.assign_by_keywords([("n_qubit", 4)]),
        Err(IrError::EmptyArguments)
    ));
    // n_qubit next to real keys is skipped
    let bound = c.assign_by_keywords([("n_qubit", 4), ("q0", 3)]).unwrap();
    assert_eq!(bound.involved_qubits(), &[QubitId(3)]);
}

#[test]
fn test_empty_list_assignment() {
    let c = Circuit::new();
    let none: Vec<u32> = vec![];
    assert!(matches!(
        c.assign_by_list(none),
        Err(IrError::EmptyArguments)
    ));
}

// ============================================================================
// From template to fixed-size program
// ============================================================================

#[test]
fn test_template_into_program() {
    let mut c = Circuit::named("prep");
    c.h(0).unwrap().cx(0, 1).unwrap();

    let bound = c.assign_by_list([1, 2]).unwrap();
    let mut prog = QProg::from_circuit(&bound, 3, 1).unwrap();
    assert_eq!(prog.to_string(), "3 qubits\n1 cbits\n2 gates\n");

    let inverse = prog.dagger().unwrap();
    let names: Vec<String> = inverse
        .instructions()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["cx q[1], q[2]", "h q[1]"]);

    prog.append(qlite_ir::Instruction::measure(QubitId(2), ClbitId(0)));
    assert!(matches!(
        prog.dagger(),
        Err(IrError::MeasuredCircuitInversion)
    ));

    assert!(matches!(
        QProg::from_circuit(&bound, 2, 0),
        Err(IrError::QubitOverflow { .. })
    ));
}
