//! Qport Local Statevector Simulator
//!
//! This crate provides the local execution engine for Qport circuits: a
//! statevector simulator with mid-circuit measurement collapse, a shot
//! runner, and a [`SimulatorBackend`] implementing the `qport-hal` job
//! lifecycle.
//!
//! # Execution model
//!
//! Every shot owns a fresh statevector and replays the circuit's
//! instruction sequence: gates evolve the state unitarily, measurements
//! sample the marginal distribution of the measured qubit, collapse the
//! state, and record a classical bit. The classical bits of a shot form
//! the outcome bitstring accumulated into the counts map.
//!
//! # Example
//!
//! ```ignore
//! use qport_adapter_sim::{RunConfig, run_shots};
//! use qport_ir::Circuit;
//!
//! let circuit = Circuit::teleportation().unwrap();
//! let result = run_shots(&circuit, &RunConfig::new(1000).with_seed(42))?;
//!
//! // The teleported |+⟩ state measures ~50/50.
//! println!("{:?}", result.counts);
//! ```
//!
//! The [`SimulatorBackend`] wraps the same runner behind the async
//! [`qport_hal::Backend`] trait so orchestration code can treat the local
//! simulator and a remote hardware queue uniformly.

mod shots;
mod simulator;
mod statevector;

pub use shots::{DEFAULT_SHOTS, RunConfig, run_shots};
pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
