//! admitgate gateway library entry.
//!
//! This crate wires config, built-in hooks, the admission endpoint, and ops
//! endpoints into an HTTP service. It is consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod config;
pub mod hooks;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
