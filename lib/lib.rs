//! Stabilizer propagation for a single *N*-qubit Pauli operator.
//!
//! A Clifford circuit can be simulated in time linear in its size by tracking
//! how a stabilizer generator — a tensor product of single-qubit Pauli
//! operators together with a global phase in {±1, ±i} — transforms under
//! conjugation by each gate, instead of tracking the full state vector.
//!
//! The [`pauli::PauliOp`] type carries one such operator and exposes the
//! conjugation rules for the Clifford generators (Hadamard, π/2 phase, CNOT)
//! and the gates derived from them. [`qasm`] interprets a line-record circuit
//! description against an operator, with optional tracing.
//!
//! # Example
//! ```
//! use pauli_prop::pauli::PauliOp;
//!
//! fn main() {
//!     // X on the first qubit, Z on the second
//!     let mut op: PauliOp = "+XZ".parse().unwrap();
//!
//!     // conjugate by a CNOT with qubit 0 as control
//!     op.apply_cnot(0, 1).unwrap();
//!     assert_eq!(op.to_string(), "-YY");
//! }
//! ```

pub mod gate;
pub mod pauli;
pub mod qasm;
