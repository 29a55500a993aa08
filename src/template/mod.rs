//! NetworkPolicy templating
//!
//! Templates use standard Jinja syntax via minijinja. Variables come from a
//! validated [`PolicyConfig`](crate::config::PolicyConfig), never from the raw
//! configuration, so a template can only render after validation succeeds.
//!
//! # Variables
//!
//! - `{{ policy_name }}`, `{{ target_namespace }}`
//! - `{{ pod_selector_labels }}` - iterate with `|items`
//! - `{{ policy_types }}`
//! - `{{ ingress_rules }}`, `{{ egress_rules }}` - empty when not configured

mod context;
mod renderer;

pub use context::RenderContext;
pub use renderer::TemplateRenderer;
