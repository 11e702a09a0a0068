//! admitgate core: transport-agnostic admission protocol primitives.
//!
//! This crate defines the decision model (patches, decisions, operation hooks)
//! and the `AdmissionReview` wire envelope shared by the gateway and by policy
//! authors. It carries no transport or runtime dependencies so decision
//! functions can be unit-tested without a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every request must resolve to an allow/deny envelope, so all fallible paths
//! surface as `AdmitError`/`Result` instead of crashing the caller.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod decision;
pub mod error;
pub mod handler;
pub mod hook;
pub mod patch;
pub mod request;
pub mod review;

pub use decision::Decision;
/// Shared result type.
pub use error::{AdmitError, Result};
pub use hook::{AdmitFn, Hook};
pub use patch::{PatchOperation, PatchType};
pub use request::{AdmissionRequest, Operation};
pub use review::{AdmissionResponse, AdmissionReview};
