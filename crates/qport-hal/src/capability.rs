//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

use qport_ir::StandardGate;

/// Capabilities of a quantum backend.
///
/// Cached at backend construction time so [`crate::Backend::capabilities`]
/// can be synchronous and infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Maximum number of qubits the backend supports.
    pub num_qubits: u32,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this backend is a simulator.
    pub is_simulator: bool,
    /// Names of the supported gates.
    pub gate_set: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator.
    ///
    /// Simulators support the full standard gate set; the qubit ceiling is
    /// a memory limit, not a topology constraint.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            max_shots: 1_000_000,
            is_simulator: true,
            gate_set: StandardGate::ALL
                .iter()
                .map(|g| g.name().to_string())
                .collect(),
        }
    }

    /// Check whether a gate is supported by name.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.iter().any(|g| g == name)
    }
}
