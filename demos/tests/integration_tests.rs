//! End-to-end tests for the teleportation pipeline.

use qport_adapter_sim::{RunConfig, SimulatorBackend, run_shots};
use qport_hal::{Backend, HalError};
use qport_ir::{Circuit, QubitId};

#[test]
fn teleportation_counts_sum_to_shots() {
    let circuit = Circuit::teleportation().unwrap();

    for shots in [1, 10, 1000] {
        let result = run_shots(&circuit, &RunConfig::new(shots).with_seed(3)).unwrap();
        assert_eq!(result.counts.total(), u64::from(shots));
    }
}

#[test]
fn teleportation_matches_direct_measurement() {
    // Measuring H|0⟩ directly and measuring the teleported copy must give
    // the same marginal distribution within sampling tolerance.
    let mut direct = Circuit::with_size("direct", 1, 1);
    direct
        .h(QubitId(0))
        .unwrap()
        .measure(QubitId(0), qport_ir::ClbitId(0))
        .unwrap();
    let teleported = Circuit::teleportation().unwrap();

    let shots = 10_000u32;
    let direct_result = run_shots(&direct, &RunConfig::new(shots).with_seed(11)).unwrap();
    let teleported_result = run_shots(&teleported, &RunConfig::new(shots).with_seed(12)).unwrap();

    let p_direct = direct_result.counts.get("1") as f64 / f64::from(shots);
    let p_teleported = teleported_result.counts.get("1") as f64 / f64::from(shots);

    assert!((p_direct - 0.5).abs() < 0.05, "direct p1 = {p_direct}");
    assert!(
        (p_teleported - 0.5).abs() < 0.05,
        "teleported p1 = {p_teleported}"
    );
    assert!((p_direct - p_teleported).abs() < 0.05);
}

#[test]
fn zero_shots_fails_fast() {
    let circuit = Circuit::teleportation().unwrap();
    let err = run_shots(&circuit, &RunConfig::new(0)).unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));
}

#[tokio::test]
async fn backend_job_lifecycle() {
    let backend = SimulatorBackend::new().with_seed(77);
    let circuit = Circuit::teleportation().unwrap();

    let job_id = backend.submit(&circuit, 500).await.unwrap();
    let status = backend.status(&job_id).await.unwrap();
    assert!(status.is_terminal());
    assert!(status.is_success());

    let result = backend.wait(&job_id).await.unwrap();
    assert_eq!(result.shots, 500);
    assert_eq!(result.counts.total(), 500);

    // Only single-bit outcomes exist for the teleportation circuit.
    for (bits, _) in result.counts.iter() {
        assert!(bits == "0" || bits == "1");
    }
}
