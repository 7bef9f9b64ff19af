//! Circuit templates: composition, qubit reassignment and rendering.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::angle::Angle;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, IntoQubit, QubitId};
use crate::qubit_map::QubitMap;
use crate::template::GateTemplate;

static NEXT_CIRCUIT_ID: AtomicU64 = AtomicU64::new(1);

fn next_circuit_id() -> u64 {
    NEXT_CIRCUIT_ID.fetch_add(1, Ordering::Relaxed)
}

/// One entry of a circuit's item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CircuitItem {
    /// A bound gate or operation.
    Instruction(Instruction),
    /// A sub-circuit kept as a single opaque entry.
    Circuit(Box<Circuit>),
}

impl CircuitItem {
    /// Qubits this entry touches.
    pub fn involved_qubits(&self) -> &[QubitId] {
        match self {
            CircuitItem::Instruction(inst) => inst.involved_qubits(),
            CircuitItem::Circuit(circuit) => circuit.involved_qubits(),
        }
    }

    /// Reassign this entry through `map`.
    ///
    /// A nested circuit keeps its `expand` flag so it stays nested, and its
    /// mapping becomes its own roles composed with `map`.
    pub fn assign_by_map(&self, map: &QubitMap) -> IrResult<Self> {
        match self {
            CircuitItem::Instruction(inst) => Ok(CircuitItem::Instruction(inst.assign_by_map(map)?)),
            CircuitItem::Circuit(circuit) => {
                let mut assigned = circuit.assign_by_map(map)?.with_expand(circuit.expand);
                assigned.mapping = Some(circuit.composed_mapping(map));
                Ok(CircuitItem::Circuit(Box::new(assigned)))
            }
        }
    }

    /// Text form of this entry.
    pub fn render(&self) -> IrResult<String> {
        match self {
            CircuitItem::Instruction(inst) => Ok(inst.to_string()),
            CircuitItem::Circuit(circuit) => circuit.render(),
        }
    }
}

/// Anything [`Circuit::append`] accepts.
#[derive(Debug, Clone)]
pub enum Appendable {
    /// A bound instruction.
    Instruction(Instruction),
    /// A gate template; accepted only once every placeholder is assigned.
    Template(GateTemplate),
    /// Another circuit.
    Circuit(Circuit),
}

impl From<Instruction> for Appendable {
    fn from(inst: Instruction) -> Self {
        Appendable::Instruction(inst)
    }
}

impl From<GateTemplate> for Appendable {
    fn from(template: GateTemplate) -> Self {
        Appendable::Template(template)
    }
}

impl From<Circuit> for Appendable {
    fn from(circuit: Circuit) -> Self {
        Appendable::Circuit(circuit)
    }
}

impl From<&Circuit> for Appendable {
    fn from(circuit: &Circuit) -> Self {
        Appendable::Circuit(circuit.clone())
    }
}

/// A quantum circuit template.
///
/// Qubit indices used while building are abstract roles. [`Circuit::assign_by_map`]
/// and its list/keyword variants produce a new circuit bound to other qubits,
/// leaving the template untouched.
///
/// ```rust
/// use qlite_ir::Circuit;
///
/// let mut c = Circuit::new();
/// c.rx(0, 1.57).unwrap().ry(1, 2.5).unwrap();
///
/// let bound = c.assign_by_keywords([("q0", 5), ("q1", 6)]).unwrap();
/// assert_eq!(bound.circuit_str().unwrap(), "rx(1.57) q[5];\nry(2.5) q[6];\n");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CircuitRepr")]
pub struct Circuit {
    #[serde(skip)]
    id: u64,
    name: Option<String>,
    items: Vec<CircuitItem>,
    involved_qubits: Vec<QubitId>,
    #[serde(skip)]
    seen: FxHashSet<QubitId>,
    fragment: bool,
    expand: bool,
    mapping: Option<QubitMap>,
}

/// Serialized fields of a [`Circuit`]. Conversion rebuilds the membership index.
#[derive(Deserialize)]
struct CircuitRepr {
    name: Option<String>,
    items: Vec<CircuitItem>,
    involved_qubits: Vec<QubitId>,
    fragment: bool,
    expand: bool,
    mapping: Option<QubitMap>,
}

impl From<CircuitRepr> for Circuit {
    fn from(repr: CircuitRepr) -> Self {
        let seen = repr.involved_qubits.iter().copied().collect();
        Self {
            id: next_circuit_id(),
            name: repr.name,
            items: repr.items,
            involved_qubits: repr.involved_qubits,
            seen,
            fragment: repr.fragment,
            expand: repr.expand,
            mapping: repr.mapping,
        }
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Circuit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.items == other.items
            && self.involved_qubits == other.involved_qubits
            && self.fragment == other.fragment
            && self.expand == other.expand
            && self.mapping == other.mapping
    }
}

impl Circuit {
    /// Create an empty, unnamed circuit.
    pub fn new() -> Self {
        Self {
            id: next_circuit_id(),
            name: None,
            items: vec![],
            involved_qubits: vec![],
            seen: FxHashSet::default(),
            fragment: false,
            expand: true,
            mapping: None,
        }
    }

    /// Create an empty circuit with a name. An empty name counts as none.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut circuit = Self::new();
        circuit.name = (!name.is_empty()).then_some(name);
        circuit
    }

    /// Create an empty fragment.
    ///
    /// Fragments never flatten into a parent and must be assigned before
    /// they can be appended anywhere.
    pub fn fragment(name: impl Into<String>) -> Self {
        let mut circuit = Self::named(name);
        circuit.fragment = true;
        circuit.expand = false;
        circuit
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Entries in execution order.
    pub fn items(&self) -> &[CircuitItem] {
        &self.items
    }

    /// Number of entries (a nested circuit counts once).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the circuit has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Qubits referenced by any entry, first-use order.
    pub fn involved_qubits(&self) -> &[QubitId] {
        &self.involved_qubits
    }

    /// Check if this circuit is a fragment.
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// Check if this circuit flattens into a parent on append.
    pub fn expand(&self) -> bool {
        self.expand
    }

    /// Set whether this circuit flattens into a parent on append.
    pub fn set_expand(&mut self, expand: bool) -> &mut Self {
        self.expand = expand;
        self
    }

    /// Builder form of [`Circuit::set_expand`].
    #[must_use]
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// The map this circuit was produced with, if it is a reassignment.
    pub fn mapping(&self) -> Option<&QubitMap> {
        self.mapping.as_ref()
    }

    /// All instructions in execution order, descending into nested circuits.
    pub fn instructions(&self) -> Vec<&Instruction> {
        let mut out = Vec::new();
        self.collect_instructions(&mut out);
        out
    }

    fn collect_instructions<'a>(&'a self, out: &mut Vec<&'a Instruction>) {
        for item in &self.items {
            match item {
                CircuitItem::Instruction(inst) => out.push(inst),
                CircuitItem::Circuit(circuit) => circuit.collect_instructions(out),
            }
        }
    }

    // =========================================================================
    // Qubit reassignment
    // =========================================================================

    /// Produce a copy bound through `map`.
    ///
    /// Every involved qubit must be a key of `map`. The result records `map`
    /// as its mapping. Assigning a fragment yields an insertable circuit that
    /// still renders as a single reference (`expand == false`).
    pub fn assign_by_map(&self, map: &QubitMap) -> IrResult<Circuit> {
        let missing = map.missing(&self.involved_qubits);
        if !missing.is_empty() {
            return Err(IrError::IncompleteQubitMap {
                expected: self.involved_qubits.clone(),
                given: map.to_string(),
                missing,
            });
        }
        debug!(
            circuit = %self.display_name(),
            mapping = %map,
            items = self.items.len(),
            "assigning circuit qubits"
        );

        let mut ret = Circuit::new();
        ret.name.clone_from(&self.name);
        ret.mapping = Some(map.clone());
        if self.fragment {
            ret.expand = false;
        }
        for item in &self.items {
            ret.push_item(item.assign_by_map(map)?);
        }
        Ok(ret)
    }

    /// Roles of this circuit sent through `outer`.
    ///
    /// With an existing mapping each role follows its current target;
    /// otherwise the involved qubits are the roles. Targets `outer` does
    /// not cover are dropped.
    fn composed_mapping(&self, outer: &QubitMap) -> QubitMap {
        match &self.mapping {
            Some(inner) => inner
                .iter()
                .filter_map(|(role, target)| outer.get(target).map(|q| (role, q)))
                .collect(),
            None => self
                .involved_qubits
                .iter()
                .filter_map(|&role| outer.get(role).map(|q| (role, q)))
                .collect(),
        }
    }

    /// Assign role `i` to `values[i]`.
    pub fn assign_by_list<I, T>(&self, values: I) -> IrResult<Circuit>
    where
        I: IntoIterator<Item = T>,
        T: IntoQubit,
    {
        self.assign_by_map(&QubitMap::from_list(values)?)
    }

    /// Assign from `q<k>=<int>` keyword pairs; `n_qubit` is ignored.
    pub fn assign_by_keywords<I, K>(&self, pairs: I) -> IrResult<Circuit>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        self.assign_by_map(&QubitMap::from_keywords(pairs)?)
    }

    // =========================================================================
    // Angle binding
    // =========================================================================

    /// Names of the angle symbols still unbound, sorted.
    pub fn parameters(&self) -> BTreeSet<String> {
        self.instructions()
            .into_iter()
            .filter_map(Instruction::as_gate)
            .flat_map(|gate| gate.angles().into_iter().flat_map(Angle::symbols))
            .collect()
    }

    /// Produce a copy with angle symbols replaced by values.
    ///
    /// Nested circuits are bound too. Symbols not named in `values` stay
    /// symbolic; qubits are untouched.
    pub fn bind_angles<I, K>(&self, values: I) -> Circuit
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut ret = self.clone();
        ret.id = next_circuit_id();
        for (name, value) in values {
            let name = name.as_ref();
            debug!(circuit = %ret.display_name(), symbol = name, value, "binding angle");
            ret.bind_angle_in_place(name, value);
        }
        ret
    }

    fn bind_angle_in_place(&mut self, name: &str, value: f64) {
        for item in &mut self.items {
            match item {
                CircuitItem::Instruction(inst) => *inst = inst.bind_angle(name, value),
                CircuitItem::Circuit(nested) => nested.bind_angle_in_place(name, value),
            }
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    fn merge_qubits(&mut self, qubits: &[QubitId]) {
        for &q in qubits {
            if self.seen.insert(q) {
                self.involved_qubits.push(q);
            }
        }
    }

    fn push_item(&mut self, item: CircuitItem) {
        self.merge_qubits(item.involved_qubits());
        self.items.push(item);
    }

    /// Append a bound instruction.
    pub fn append_gate(&mut self, instruction: Instruction) -> &mut Self {
        self.merge_qubits(instruction.involved_qubits());
        self.items.push(CircuitItem::Instruction(instruction));
        self
    }

    /// Append another circuit.
    ///
    /// The circuit's entries are flattened in when `expand` is set or the
    /// other circuit has `expand == true`; otherwise it is nested as one
    /// entry. Fragments are rejected until assigned.
    pub fn append_circuit(&mut self, other: &Circuit, expand: bool) -> IrResult<&mut Self> {
        if other.fragment {
            return Err(IrError::UnassignedFragment(other.display_name()));
        }
        self.merge_circuit(other.clone(), expand);
        Ok(self)
    }

    /// Append a snapshot of this circuit to itself.
    pub fn append_self(&mut self, expand: bool) -> IrResult<&mut Self> {
        let snapshot = self.clone();
        self.append_circuit(&snapshot, expand)
    }

    fn merge_circuit(&mut self, other: Circuit, expand: bool) {
        self.merge_qubits(&other.involved_qubits);
        if expand || other.expand {
            debug!(
                target_circuit = %self.display_name(),
                source = %other.display_name(),
                items = other.items.len(),
                "flattening circuit"
            );
            self.items.extend(other.items);
        } else {
            debug!(
                target_circuit = %self.display_name(),
                source = %other.display_name(),
                "nesting circuit"
            );
            self.items.push(CircuitItem::Circuit(Box::new(other)));
        }
    }

    /// Append an instruction, bound template or circuit.
    ///
    /// Circuits are nested unless they are expandable themselves; see
    /// [`Circuit::append_with`] to force flattening.
    pub fn append(&mut self, item: impl Into<Appendable>) -> IrResult<&mut Self> {
        self.append_with(item, false)
    }

    /// Append with an explicit flattening choice for circuits.
    pub fn append_with(&mut self, item: impl Into<Appendable>, expand: bool) -> IrResult<&mut Self> {
        match item.into() {
            Appendable::Instruction(inst) => Ok(self.append_gate(inst)),
            Appendable::Template(template) => {
                if !template.is_bound() {
                    return Err(IrError::InvalidAppendTarget(format!(
                        "gate template '{template}' has unassigned placeholders"
                    )));
                }
                let inst = template.bind()?;
                Ok(self.append_gate(inst))
            }
            Appendable::Circuit(circuit) => {
                if circuit.fragment {
                    return Err(IrError::UnassignedFragment(circuit.display_name()));
                }
                self.merge_circuit(circuit, expand);
                Ok(self)
            }
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    fn apply(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let inst = Instruction::gate(gate, qubits)?;
        Ok(self.append_gate(inst))
    }

    /// Apply a gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(gate, qubits)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::H, [qubit.into_qubit()?])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::X, [qubit.into_qubit()?])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::Y, [qubit.into_qubit()?])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::Z, [qubit.into_qubit()?])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::S, [qubit.into_qubit()?])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::Sdg, [qubit.into_qubit()?])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::T, [qubit.into_qubit()?])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::Tdg, [qubit.into_qubit()?])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::SX, [qubit.into_qubit()?])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, qubit: impl IntoQubit, angle: impl Into<Angle>) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rx(angle.into()), [qubit.into_qubit()?])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, qubit: impl IntoQubit, angle: impl Into<Angle>) -> IrResult<&mut Self> {
        self.apply(StandardGate::Ry(angle.into()), [qubit.into_qubit()?])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, qubit: impl IntoQubit, angle: impl Into<Angle>) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rz(angle.into()), [qubit.into_qubit()?])
    }

    /// Apply phase gate.
    pub fn p(&mut self, qubit: impl IntoQubit, angle: impl Into<Angle>) -> IrResult<&mut Self> {
        self.apply(StandardGate::P(angle.into()), [qubit.into_qubit()?])
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        qubit: impl IntoQubit,
        theta: impl Into<Angle>,
        phi: impl Into<Angle>,
        lambda: impl Into<Angle>,
    ) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            [qubit.into_qubit()?],
        )
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: impl IntoQubit, target: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CX,
            [control.into_qubit()?, target.into_qubit()?],
        )
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: impl IntoQubit, target: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CY,
            [control.into_qubit()?, target.into_qubit()?],
        )
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: impl IntoQubit, target: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CZ,
            [control.into_qubit()?, target.into_qubit()?],
        )
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: impl IntoQubit, q2: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::Swap, [q1.into_qubit()?, q2.into_qubit()?])
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: impl IntoQubit, q2: impl IntoQubit) -> IrResult<&mut Self> {
        self.apply(StandardGate::ISwap, [q1.into_qubit()?, q2.into_qubit()?])
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        control: impl IntoQubit,
        target: impl IntoQubit,
        angle: impl Into<Angle>,
    ) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CP(angle.into()),
            [control.into_qubit()?, target.into_qubit()?],
        )
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        control: impl IntoQubit,
        target: impl IntoQubit,
        angle: impl Into<Angle>,
    ) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CRz(angle.into()),
            [control.into_qubit()?, target.into_qubit()?],
        )
    }

    /// Apply ZZ rotation gate.
    pub fn rzz(
        &mut self,
        q1: impl IntoQubit,
        q2: impl IntoQubit,
        angle: impl Into<Angle>,
    ) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::RZZ(angle.into()),
            [q1.into_qubit()?, q2.into_qubit()?],
        )
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(
        &mut self,
        c1: impl IntoQubit,
        c2: impl IntoQubit,
        target: impl IntoQubit,
    ) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CCX,
            [c1.into_qubit()?, c2.into_qubit()?, target.into_qubit()?],
        )
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(
        &mut self,
        control: impl IntoQubit,
        t1: impl IntoQubit,
        t2: impl IntoQubit,
    ) -> IrResult<&mut Self> {
        self.apply(
            StandardGate::CSwap,
            [control.into_qubit()?, t1.into_qubit()?, t2.into_qubit()?],
        )
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: impl IntoQubit, clbit: ClbitId) -> IrResult<&mut Self> {
        Ok(self.append_gate(Instruction::measure(qubit.into_qubit()?, clbit)))
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: impl IntoQubit) -> IrResult<&mut Self> {
        Ok(self.append_gate(Instruction::reset(qubit.into_qubit()?)))
    }

    /// Apply a barrier to the given qubits.
    pub fn barrier<I, Q>(&mut self, qubits: I) -> IrResult<&mut Self>
    where
        I: IntoIterator<Item = Q>,
        Q: IntoQubit,
    {
        let qubits = qubits
            .into_iter()
            .map(IntoQubit::into_qubit)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(self.append_gate(Instruction::barrier(qubits)))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Name used in summaries: the circuit name, or its identity in hex.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("0x{:x}", self.id),
        }
    }

    /// Every entry followed by `;` and a newline.
    pub fn circuit_str(&self) -> IrResult<String> {
        let mut ret = String::new();
        for item in &self.items {
            ret.push_str(&item.render()?);
            ret.push_str(";\n");
        }
        Ok(ret)
    }

    /// Text form of the circuit.
    ///
    /// Fragments render as a titled block, non-expanding circuits as a
    /// one-line reference, everything else as [`Circuit::circuit_str`].
    pub fn render(&self) -> IrResult<String> {
        if self.fragment {
            let name = self.name.as_deref().ok_or(IrError::UnnamedFragment)?;
            let title = format!("Fragment {name}");
            return Ok(format!("---{title:^25}---\n{}", self.circuit_str()?));
        }
        if !self.expand {
            let name = self.display_name();
            return Ok(match &self.mapping {
                Some(mapping) => format!("{name} qubit_mapping: {mapping}"),
                None => {
                    let qubits = self
                        .involved_qubits
                        .iter()
                        .map(|q| q.0.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{name} q[{qubits}]")
                }
            });
        }
        self.circuit_str()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize to JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
