//! Axum router wiring.
//!
//! Ops endpoints plus one POST route per configured webhook path.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics));

    for r in state.routes() {
        router = router.route(&r.path, post(transport::admission::admission));
    }

    let limit = state.cfg().gateway.max_body_bytes;
    router
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}
