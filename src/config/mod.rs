//! Policy configuration loading
//!
//! A configuration file is a YAML mapping describing one NetworkPolicy:
//!
//! ```yaml
//! policy_name: allow-frontend
//! target_namespace: web
//! pod_selector_labels:
//!   app: frontend
//! policy_types:
//!   - Ingress
//!   - Egress
//! ingress_rules:
//!   - namespace_selector:
//!       kubernetes.io/metadata.name: ingress-nginx
//!     ports:
//!       - protocol: TCP
//!         port: 8080
//! egress_rules:
//!   - {}
//! ```
//!
//! [`load_config`] produces the untyped [`RawConfig`]; [`validate`] turns it
//! into a [`PolicyConfig`] that the renderer consumes.

mod validation;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

pub use validation::validate;

/// Top-level configuration mapping as parsed from disk
pub type RawConfig = serde_yaml::Mapping;

/// Traffic direction a NetworkPolicy applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolicyType {
    /// Inbound traffic to the selected pods
    Ingress,
    /// Outbound traffic from the selected pods
    Egress,
}

impl PolicyType {
    /// Kubernetes spelling of the policy type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingress => "Ingress",
            Self::Egress => "Egress",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = Error;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Ingress" => Ok(Self::Ingress),
            "Egress" => Ok(Self::Egress),
            other => Err(Error::invalid_policy_type(other)),
        }
    }
}

/// Validated policy configuration
///
/// Only [`validate`] constructs this, so holding one means every required
/// field is present and well-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// `metadata.name` of the generated policy
    pub policy_name: String,
    /// `metadata.namespace` of the generated policy
    pub target_namespace: String,
    /// `spec.podSelector.matchLabels`
    pub pod_selector_labels: BTreeMap<String, String>,
    /// `spec.policyTypes`, in config order
    pub policy_types: Vec<PolicyType>,
    /// Ingress rules, passed to the template untouched
    pub ingress_rules: Option<serde_yaml::Value>,
    /// Egress rules, passed to the template untouched
    pub egress_rules: Option<serde_yaml::Value>,
}

/// Read and parse a configuration file
///
/// # Errors
///
/// - [`Error::ConfigNotFound`] if `path` is not an existing file
/// - [`Error::ConfigRead`] if the file exists but cannot be read
/// - [`Error::ConfigParse`] if the contents are not YAML or the top level is
///   not a mapping
pub fn load_config(path: &Path) -> Result<RawConfig> {
    debug!(path = %path.display(), "loading configuration");

    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_config(&content).map_err(|message| Error::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(content: &[u8]) -> std::result::Result<RawConfig, String> {
    let value: serde_yaml::Value = serde_yaml::from_slice(content).map_err(|e| e.to_string())?;

    match value {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        serde_yaml::Value::Null => Err("document is empty".to_string()),
        other => Err(format!(
            "top level must be a mapping, found {}",
            validation::describe(&other)
        )),
    }
}
