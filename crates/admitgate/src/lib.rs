//! Top-level facade crate for admitgate.
//!
//! Re-exports the core decision model and the gateway library so users can
//! depend on a single crate.

pub mod core {
    pub use admitgate_core::*;
}

pub mod gateway {
    pub use admitgate_gateway::*;
}
