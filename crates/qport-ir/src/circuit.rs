//! High-level circuit builder API.

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

use serde::{Deserialize, Serialize};

/// A quantum circuit.
///
/// A circuit is an ordered sequence of gate and measurement instructions
/// over a fixed set of qubits and classical bits. Once built it is replayed
/// identically for every shot; nothing in the execution path mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// The ordered instruction sequence.
    ops: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            ops: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.qubits.len() as u32);
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = ClbitId(self.clbits.len() as u32);
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Validate and append a gate instruction.
    fn push_gate(&mut self, gate: StandardGate, qubits: Vec<QubitId>) -> IrResult<()> {
        if qubits.len() as u32 != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len() as u32,
            });
        }
        for (i, qubit) in qubits.iter().enumerate() {
            if qubit.0 as usize >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit: *qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
            if qubits[..i].contains(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit: *qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        self.ops.push(Instruction::gate(gate, qubits));
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::H, vec![qubit])?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::X, vec![qubit])?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Y, vec![qubit])?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Z, vec![qubit])?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::S, vec![qubit])?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Sdg, vec![qubit])?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CX, vec![control, target])?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::CZ, vec![control, target])?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push_gate(StandardGate::Swap, vec![q1, q2])?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        if qubit.0 as usize >= self.qubits.len() {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: Some("measure".to_string()),
            });
        }
        if clbit.0 as usize >= self.clbits.len() {
            return Err(IrError::ClbitNotFound { clbit });
        }
        self.ops.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        // Ensure we have enough classical bits
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }
        for i in 0..self.qubits.len() as u32 {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the instruction sequence.
    pub fn ops(&self) -> &[Instruction] {
        &self.ops
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Check whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new("bell");
        let q = circuit.add_qreg("q", 2);
        let c = circuit.add_creg("c", 2);

        circuit
            .h(q[0])?
            .cx(q[0], q[1])?
            .measure(q[0], c[0])?
            .measure(q[1], c[1])?;

        Ok(circuit)
    }

    /// Create the standard teleportation circuit.
    ///
    /// Qubit 0 carries the input state (prepared as H|0⟩), qubit 1 is the
    /// sender's half of the shared Bell pair and qubit 2 the receiver's half.
    /// The classical corrections are folded into unconditional CX/CZ gates
    /// via the deferred-measurement identity, so only the receiver qubit is
    /// measured.
    pub fn teleportation() -> IrResult<Self> {
        let mut circuit = Self::new("teleportation");
        let q = circuit.add_qreg("q", 3);
        let c = circuit.add_creg("c", 1);

        circuit
            // Input state |+⟩ on the sender's data qubit.
            .h(q[0])?
            // Bell pair shared between qubits 1 and 2.
            .h(q[1])?
            .cx(q[1], q[2])?
            // Bell-basis coupling of the input with the sender's half.
            .cx(q[0], q[1])?
            .h(q[0])?
            // Deferred corrections: X conditioned on qubit 1, Z on qubit 0.
            .cx(q[1], q[2])?
            .cz(q[0], q[2])?
            // Only the receiver qubit is read out.
            .measure(q[2], c[0])?;

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::InstructionKind;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 4);
        let creg = circuit.add_creg("c", 4);

        assert_eq!(qreg.len(), 4);
        assert_eq!(creg.len(), 4);
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.qubits()[2].register.as_deref(), Some("q"));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();

        assert_eq!(circuit.num_ops(), 4); // H, CX, two measures
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.h(QubitId(5)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_unknown_clbit_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.measure(QubitId(0), ClbitId(0)).unwrap_err();
        assert!(matches!(err, IrError::ClbitNotFound { .. }));
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.num_ops(), 4);
    }

    #[test]
    fn test_teleportation_sequence() {
        let circuit = Circuit::teleportation().unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 1);

        let names: Vec<_> = circuit.ops().iter().map(Instruction::name).collect();
        assert_eq!(
            names,
            vec!["h", "h", "cx", "cx", "h", "cx", "cz", "measure"]
        );

        // The single measurement reads the receiver qubit into c0.
        let measure = circuit.ops().last().unwrap();
        assert_eq!(measure.kind, InstructionKind::Measure);
        assert_eq!(measure.qubits, vec![QubitId(2)]);
        assert_eq!(measure.clbits, vec![ClbitId(0)]);
    }

    #[test]
    fn test_teleportation_operands() {
        let circuit = Circuit::teleportation().unwrap();
        let operands: Vec<Vec<u32>> = circuit
            .ops()
            .iter()
            .map(|inst| inst.qubits.iter().map(|q| q.0).collect())
            .collect();
        assert_eq!(
            operands,
            vec![
                vec![0],
                vec![1],
                vec![1, 2],
                vec![0, 1],
                vec![0],
                vec![1, 2],
                vec![0, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn test_circuit_serde_roundtrip() {
        let circuit = Circuit::teleportation().unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let decoded: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, circuit);
    }
}
