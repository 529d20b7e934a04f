//! Shot execution loop.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use qport_hal::{Counts, ExecutionResult, HalError, HalResult};
use qport_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Default number of shots per run.
pub const DEFAULT_SHOTS: u32 = 1000;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of shots to execute.
    pub shots: u32,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Create a configuration with the given shot count.
    pub fn new(shots: u32) -> Self {
        Self { shots, seed: None }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Execute a circuit for the configured number of shots.
///
/// Each shot owns a fresh statevector and replays the instruction sequence
/// from scratch; the only state carried between shots is the RNG stream.
/// Fails with [`HalError::InvalidShots`] when the shot count is zero.
pub fn run_shots(circuit: &Circuit, config: &RunConfig) -> HalResult<ExecutionResult> {
    if config.shots == 0 {
        return Err(HalError::InvalidShots(
            "shot count must be positive".to_string(),
        ));
    }

    let start = Instant::now();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    debug!(
        circuit = circuit.name(),
        qubits = circuit.num_qubits(),
        shots = config.shots,
        "starting simulation"
    );

    let mut counts = Counts::new();
    for _ in 0..config.shots {
        let bits = run_single_shot(circuit, &mut rng)?;
        counts.record(bits, 1);
    }

    let elapsed = start.elapsed();
    debug!(elapsed_ms = elapsed.as_millis() as u64, "simulation complete");

    Ok(ExecutionResult::new(counts, config.shots)
        .with_execution_time(elapsed.as_millis() as u64))
}

/// Run a single shot and return the classical bitstring (clbit 0 first).
fn run_single_shot(circuit: &Circuit, rng: &mut StdRng) -> HalResult<String> {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut classical = vec![0u8; circuit.num_clbits()];

    for inst in circuit.ops() {
        match inst.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = inst.qubits.iter().map(|q| q.0 as usize).collect();
                sv.apply_gate(gate, &qubits);
            }
            InstructionKind::Measure => {
                for (qubit, clbit) in inst.qubits.iter().zip(&inst.clbits) {
                    let bit = sv.measure(qubit.0 as usize, rng)?;
                    classical[clbit.0 as usize] = bit;
                }
            }
        }
    }

    Ok(classical
        .iter()
        .map(|&bit| char::from(b'0' + bit))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_shots_rejected() {
        let circuit = Circuit::teleportation().unwrap();
        let err = run_shots(&circuit, &RunConfig::new(0)).unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let circuit = Circuit::teleportation().unwrap();
        let result = run_shots(&circuit, &RunConfig::new(1000)).unwrap();
        assert_eq!(result.shots, 1000);
        assert_eq!(result.counts.total(), 1000);
    }

    #[test]
    fn test_single_shot_single_outcome() {
        let circuit = Circuit::teleportation().unwrap();
        let result = run_shots(&circuit, &RunConfig::new(1).with_seed(42)).unwrap();

        assert_eq!(result.counts.total(), 1);
        assert_eq!(result.counts.len(), 1);
        let (outcome, count) = result.counts.most_frequent().unwrap();
        assert!(outcome == "0" || outcome == "1");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let circuit = Circuit::teleportation().unwrap();
        let config = RunConfig::new(200).with_seed(7);
        let a = run_shots(&circuit, &config).unwrap();
        let b = run_shots(&circuit, &config).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_teleportation_marginal_is_balanced() {
        // The teleported state is |+⟩, so the measured qubit should land
        // within statistical tolerance of 50/50 at 1000 shots.
        let circuit = Circuit::teleportation().unwrap();
        let result = run_shots(&circuit, &RunConfig::new(1000).with_seed(1234)).unwrap();

        let zeros = result.counts.get("0");
        let ones = result.counts.get("1");
        assert_eq!(zeros + ones, 1000);
        assert!(zeros.abs_diff(500) < 50, "zeros = {zeros}");
        assert!(ones.abs_diff(500) < 50, "ones = {ones}");
    }

    #[test]
    fn test_teleportation_large_sample() {
        let circuit = Circuit::teleportation().unwrap();
        let result = run_shots(&circuit, &RunConfig::new(10_000).with_seed(99)).unwrap();

        let ones = result.counts.get("1");
        // 3-sigma band around p = 0.5 at 10000 samples is roughly ±150.
        assert!(ones.abs_diff(5000) < 200, "ones = {ones}");
    }

    #[test]
    fn test_bell_circuit_correlations() {
        let circuit = Circuit::bell().unwrap();
        let result = run_shots(&circuit, &RunConfig::new(1000).with_seed(5)).unwrap();

        // Bell pair measurements are perfectly correlated.
        assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
        assert_eq!(result.counts.get("01") + result.counts.get("10"), 0);
    }

    #[test]
    fn test_circuit_without_measurement_yields_empty_string() {
        let mut circuit = Circuit::with_size("unitary-only", 1, 0);
        circuit.h(qport_ir::QubitId(0)).unwrap();

        let result = run_shots(&circuit, &RunConfig::new(3).with_seed(0)).unwrap();
        assert_eq!(result.counts.get(""), 3);
    }
}
