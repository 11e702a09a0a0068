//! Transport layer (HTTP).
//!
//! Exposes the admission endpoint that hands raw bodies to the core handler.

pub mod admission;
