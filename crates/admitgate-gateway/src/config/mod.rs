//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use admitgate_core::error::{AdmitError, Result};

pub use schema::{GatewayConfig, GatewaySection, HookKind, WebhookConfig};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "ADMITGATE_CONFIG";
/// Used when `ADMITGATE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "admitgate.yaml";

/// Resolve and load the config.
///
/// An explicitly named file must exist. The default path is optional and
/// falls back to built-in defaults when absent.
pub fn load() -> Result<GatewayConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => {
            tracing::info!(path = DEFAULT_CONFIG_PATH, "config file not found, using defaults");
            let cfg = GatewayConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AdmitError::Config(format!("read {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| AdmitError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
