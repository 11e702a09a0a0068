//! Built-in decision functions, grouped per resource kind.
//!
//! Each submodule exposes constructors returning a ready `Hook`; the config
//! names them through `HookKind`.

pub mod deployments;
pub mod pods;
pub mod resource;

use admitgate_core::Hook;

use crate::config::HookKind;

/// Build the hook a webhook route is bound to.
pub fn build(kind: HookKind) -> Hook {
    match kind {
        HookKind::PodsValidation => pods::validation_hook(),
        HookKind::PodsMutation => pods::mutation_hook(),
        HookKind::DeploymentsValidation => deployments::validation_hook(),
    }
}
