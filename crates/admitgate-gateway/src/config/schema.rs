use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;
use admitgate_core::error::{AdmitError, Result};

/// Paths owned by the ops endpoints.
pub const RESERVED_PATHS: [&str; 2] = ["/healthz", "/metrics"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default = "default_webhooks")]
    pub webhooks: Vec<WebhookConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            webhooks: default_webhooks(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AdmitError::UnsupportedVersion);
        }
        if self.webhooks.is_empty() {
            return Err(AdmitError::Config("webhooks must not be empty".into()));
        }

        self.gateway.validate()?;

        let mut seen = HashSet::new();
        for w in &self.webhooks {
            w.validate()?;
            if !seen.insert(w.path.as_str()) {
                return Err(AdmitError::Config(format!("duplicate webhook path: {}", w.path)));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1024..=64 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(AdmitError::Config(
                "gateway.max_body_bytes must be between 1024 and 67108864".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            AdmitError::Config(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8443".into()
}
fn default_max_body_bytes() -> usize {
    3 * 1024 * 1024
}

/// Binds one URL path to one built-in hook.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    pub path: String,
    pub hook: HookKind,
}

impl WebhookConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(AdmitError::Config(format!(
                "webhook path must start with '/': {}",
                self.path
            )));
        }
        if self.path.contains(&[':', '*', '{', '}'][..]) {
            return Err(AdmitError::Config(format!(
                "webhook path must be literal (no captures or wildcards): {}",
                self.path
            )));
        }
        if RESERVED_PATHS.contains(&self.path.as_str()) {
            return Err(AdmitError::Config(format!("webhook path is reserved: {}", self.path)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookKind {
    PodsValidation,
    PodsMutation,
    DeploymentsValidation,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::PodsValidation => "pods-validation",
            HookKind::PodsMutation => "pods-mutation",
            HookKind::DeploymentsValidation => "deployments-validation",
        }
    }
}

fn default_webhooks() -> Vec<WebhookConfig> {
    vec![
        WebhookConfig {
            path: "/validate/pods".into(),
            hook: HookKind::PodsValidation,
        },
        WebhookConfig {
            path: "/mutate/pods".into(),
            hook: HookKind::PodsMutation,
        },
        WebhookConfig {
            path: "/validate/deployments".into(),
            hook: HookKind::DeploymentsValidation,
        },
    ]
}
