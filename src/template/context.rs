//! Rendering context built from a validated configuration
//!
//! Templates see exactly these top-level variables:
//! - `policy_name`, `target_namespace` - strings
//! - `pod_selector_labels` - mapping of label key to value
//! - `policy_types` - sequence of `"Ingress"` / `"Egress"`
//! - `ingress_rules`, `egress_rules` - rule sequences as written in the
//!   config, or empty sequences when absent

use std::collections::BTreeMap;

use minijinja::Value;

use crate::config::PolicyConfig;

/// Template variables exposed for a [`PolicyConfig`]
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    config: &'a PolicyConfig,
}

impl<'a> RenderContext<'a> {
    /// Create a context over `config`
    pub fn new(config: &'a PolicyConfig) -> Self {
        Self { config }
    }

    /// Convert to minijinja Value for rendering
    pub fn to_value(&self) -> Value {
        let mut map: BTreeMap<&'static str, Value> = BTreeMap::new();

        map.insert("policy_name", Value::from(self.config.policy_name.clone()));
        map.insert(
            "target_namespace",
            Value::from(self.config.target_namespace.clone()),
        );
        map.insert(
            "pod_selector_labels",
            Value::from_iter(self.config.pod_selector_labels.clone()),
        );
        map.insert(
            "policy_types",
            Value::from_serialize(&self.config.policy_types),
        );

        // Absent rule lists render as empty sequences so `{% if %}` and
        // `{% for %}` work under strict undefined handling.
        map.insert("ingress_rules", rules_value(self.config.ingress_rules.as_ref()));
        map.insert("egress_rules", rules_value(self.config.egress_rules.as_ref()));

        Value::from_iter(map)
    }
}

fn rules_value(rules: Option<&serde_yaml::Value>) -> Value {
    match rules {
        Some(rules) => Value::from_serialize(rules),
        None => Value::from(Vec::<Value>::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Environment;

    use crate::config::PolicyType;

    const VARIABLES: [&str; 6] = [
        "policy_name",
        "target_namespace",
        "pod_selector_labels",
        "policy_types",
        "ingress_rules",
        "egress_rules",
    ];

    fn sample_config() -> PolicyConfig {
        PolicyConfig {
            policy_name: "allow-web".to_string(),
            target_namespace: "web".to_string(),
            pod_selector_labels: BTreeMap::from([
                ("tier".to_string(), "frontend".to_string()),
                ("app".to_string(), "shop".to_string()),
            ]),
            policy_types: vec![PolicyType::Ingress, PolicyType::Egress],
            ingress_rules: None,
            egress_rules: None,
        }
    }

    fn render(template: &str, config: &PolicyConfig) -> String {
        Environment::new()
            .render_str(template, RenderContext::new(config).to_value())
            .expect("template should render against the context")
    }

    #[test]
    fn test_exposes_only_enumerated_variables() {
        let config = sample_config();
        let value = RenderContext::new(&config).to_value();

        assert_eq!(value.len(), Some(VARIABLES.len()));
        for name in VARIABLES {
            let var = value
                .get_attr(name)
                .expect("attribute lookup should not fail");
            assert!(!var.is_undefined(), "{name} should be defined");
        }
    }

    #[test]
    fn test_scalars_and_policy_types() {
        let config = sample_config();
        assert_eq!(
            render(
                "{{ policy_name }}/{{ target_namespace }}:{{ policy_types|join(',') }}",
                &config
            ),
            "allow-web/web:Ingress,Egress"
        );
    }

    #[test]
    fn test_labels_iterate_in_key_order() {
        let config = sample_config();
        assert_eq!(
            render(
                "{% for k, v in pod_selector_labels|items %}{{ k }}={{ v }};{% endfor %}",
                &config
            ),
            "app=shop;tier=frontend;"
        );
    }

    #[test]
    fn test_absent_rules_are_empty_sequences() {
        let config = sample_config();
        assert_eq!(
            render(
                "{% if ingress_rules %}yes{% else %}no{% endif %}{{ egress_rules|length }}",
                &config
            ),
            "no0"
        );
    }

    #[test]
    fn test_rules_keep_nested_structure() {
        let mut config = sample_config();
        config.ingress_rules = Some(
            serde_yaml::from_str(
                "- namespace_selector: {team: payments}\n  ports: [{protocol: TCP, port: 8080}]\n",
            )
            .expect("fixture rules should parse"),
        );

        assert_eq!(
            render(
                "{% for r in ingress_rules %}{{ r.namespace_selector.team }} {{ r.ports[0].protocol }}/{{ r.ports[0].port }}{% endfor %}",
                &config
            ),
            "payments TCP/8080"
        );
    }
}
