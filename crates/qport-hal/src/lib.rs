//! Qport Backend Abstraction Layer
//!
//! This crate provides a unified interface for executing quantum circuits,
//! whether on a local simulator or a remote hardware queue.
//!
//! # Overview
//!
//! The HAL abstracts away backend-specific details, providing:
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] to describe backend features and constraints
//! - The job state machine ([`JobStatus`]) with a polling [`Backend::wait`]
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! Backends are always injected: nothing in this workspace reaches for a
//! process-global backend handle, which keeps the simulation core testable
//! without any execution environment.
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qport_hal::Backend;
//! use qport_adapter_sim::SimulatorBackend;
//! use qport_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> qport_hal::HalResult<()> {
//!     let circuit = Circuit::teleportation().unwrap();
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     // The teleported |+⟩ state gives a ~50/50 split between "0" and "1".
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
