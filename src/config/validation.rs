//! Structural validation of a loaded configuration
//!
//! Checks run in a fixed order and stop at the first failure:
//! required keys, `pod_selector_labels`, `policy_types`, then the
//! `policy_name` and `target_namespace` scalars.

use std::collections::BTreeMap;

use serde_yaml::Value;
use tracing::{debug, warn};

use super::{PolicyConfig, PolicyType, RawConfig};
use crate::error::{Error, Result};

/// Keys every configuration must define, in the order they are checked
const REQUIRED_FIELDS: [&str; 4] = [
    "policy_name",
    "target_namespace",
    "pod_selector_labels",
    "policy_types",
];

const OPTIONAL_FIELDS: [&str; 2] = ["ingress_rules", "egress_rules"];

/// Validate a raw configuration and build the typed [`PolicyConfig`]
///
/// # Errors
///
/// - [`Error::MissingField`] for the first absent required key
/// - [`Error::WrongType`] when a field has the wrong shape
/// - [`Error::InvalidEnumValue`] for a `policy_types` entry other than
///   `Ingress` or `Egress`
pub fn validate(config: &RawConfig) -> Result<PolicyConfig> {
    for field in REQUIRED_FIELDS {
        if !config.contains_key(field) {
            return Err(Error::MissingField { field });
        }
    }

    let pod_selector_labels = selector_labels(field(config, "pod_selector_labels")?)?;
    let policy_types = policy_types(field(config, "policy_types")?)?;
    let policy_name = scalar_field(config, "policy_name")?;
    let target_namespace = scalar_field(config, "target_namespace")?;

    warn_unknown_keys(config);

    debug!(
        policy = %policy_name,
        namespace = %target_namespace,
        labels = pod_selector_labels.len(),
        "configuration validated"
    );

    Ok(PolicyConfig {
        policy_name,
        target_namespace,
        pod_selector_labels,
        policy_types,
        ingress_rules: optional_rules(config, "ingress_rules"),
        egress_rules: optional_rules(config, "egress_rules"),
    })
}

fn field<'a>(config: &'a RawConfig, name: &'static str) -> Result<&'a Value> {
    config
        .get(name)
        .ok_or(Error::MissingField { field: name })
}

/// Strings as written; bare numbers such as `2024` keep their YAML spelling
fn scalar_field(config: &RawConfig, name: &'static str) -> Result<String> {
    match field(config, name)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::wrong_type(name, "a string", describe(other))),
    }
}

fn selector_labels(value: &Value) -> Result<BTreeMap<String, String>> {
    let mapping = value.as_mapping().ok_or_else(|| {
        Error::wrong_type("pod_selector_labels", "a mapping", describe(value))
    })?;

    mapping
        .iter()
        .map(|(key, label)| {
            let key = key.as_str().ok_or_else(|| {
                Error::wrong_type(
                    "pod_selector_labels",
                    "a mapping with string keys",
                    describe(key),
                )
            })?;
            let label = label.as_str().ok_or_else(|| {
                Error::wrong_type(
                    format!("pod_selector_labels.{key}"),
                    "a string",
                    describe(label),
                )
            })?;
            Ok((key.to_string(), label.to_string()))
        })
        .collect()
}

fn policy_types(value: &Value) -> Result<Vec<PolicyType>> {
    let items = value
        .as_sequence()
        .ok_or_else(|| Error::wrong_type("policy_types", "a sequence", describe(value)))?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.parse::<PolicyType>(),
            other => Err(Error::invalid_policy_type(scalar_text(other))),
        })
        .collect()
}

fn optional_rules(config: &RawConfig, name: &str) -> Option<Value> {
    match config.get(name) {
        None | Some(Value::Null) => None,
        Some(rules) => Some(rules.clone()),
    }
}

fn warn_unknown_keys(config: &RawConfig) {
    for key in config.keys() {
        let known = key
            .as_str()
            .is_some_and(|k| REQUIRED_FIELDS.contains(&k) || OPTIONAL_FIELDS.contains(&k));
        if !known {
            warn!(key = %scalar_text(key), "ignoring unknown configuration key");
        }
    }
}

/// Human-readable shape of a YAML value, used in error messages
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| describe(other).to_string()),
    }
}
