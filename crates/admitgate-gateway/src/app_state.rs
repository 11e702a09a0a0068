//! Shared application state for the admitgate gateway.
//!
//! The route table is compiled once from config and never mutated, so request
//! handlers read it concurrently without locking.

use std::sync::Arc;

use admitgate_core::error::Result;
use admitgate_core::Hook;

use crate::config::{GatewayConfig, HookKind};
use crate::hooks;
use crate::obs::AdmissionMetrics;

/// One webhook path bound to its hook.
pub struct Route {
    pub path: String,
    pub kind: HookKind,
    pub hook: Hook,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<AdmissionMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    routes: Vec<Route>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let routes: Vec<Route> = cfg
            .webhooks
            .iter()
            .map(|w| Route {
                path: w.path.clone(),
                kind: w.hook,
                hook: hooks::build(w.hook),
            })
            .collect();

        for r in &routes {
            let ops: Vec<String> = r.hook.registered().into_iter().map(String::from).collect();
            tracing::info!(
                path = %r.path,
                hook = r.kind.as_str(),
                operations = ?ops,
                "webhook registered"
            );
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, routes }),
            metrics: Arc::new(AdmissionMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn routes(&self) -> &[Route] {
        &self.inner.routes
    }

    pub fn route(&self, path: &str) -> Option<&Route> {
        self.inner.routes.iter().find(|r| r.path == path)
    }

    pub fn metrics(&self) -> &AdmissionMetrics {
        &self.metrics
    }
}
