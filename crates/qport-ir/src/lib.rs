//! Qport Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Qport: qubits and classical bits, the supported gate set,
//! instructions, and the high-level [`Circuit`] builder.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered, validated instruction sequence. Construction
//! is the only fallible part; execution backends replay the sequence without
//! further checks. Pre-built circuits exist for the Bell state and for the
//! quantum teleportation protocol, which is the reference workload of this
//! workspace.
//!
//! # Example: Building the Teleportation Circuit
//!
//! ```rust
//! use qport_ir::Circuit;
//!
//! let circuit = Circuit::teleportation().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.num_clbits(), 1);
//! assert_eq!(circuit.num_ops(), 8); // 7 gates + 1 measurement
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
