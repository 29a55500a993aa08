//! Command-line interface and pipeline driver

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::{load_config, validate};
use crate::output::write_output;
use crate::template::TemplateRenderer;
use crate::Result;

const AFTER_HELP: &str = "\
Examples:
  # Render example-config.yaml with network-policy.yaml.j2 to stdout
  netpol-gen

  # Use your own config and save the result
  netpol-gen -c my-config.yaml -o my-policy.yaml

  # Only check the config
  netpol-gen -c my-config.yaml --validate-only

Configuration structure:
  policy_name: policy-name
  target_namespace: target-namespace
  pod_selector_labels:
    app: app-name
  policy_types:
    - Ingress
    - Egress
  ingress_rules:
    - namespace_selector:
        kubernetes.io/metadata.name: source-namespace
      ports:
        - protocol: TCP
          port: 8080
  egress_rules:
    - {}";

/// Render a Kubernetes NetworkPolicy from a YAML config and a Jinja template
#[derive(Parser, Debug)]
#[command(name = "netpol-gen", version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    /// Configuration file to load
    #[arg(short, long, default_value = "example-config.yaml")]
    pub config: PathBuf,

    /// Jinja template to render
    #[arg(short, long, default_value = "network-policy.yaml.j2")]
    pub template: PathBuf,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Validate the configuration and exit without rendering
    #[arg(short, long)]
    pub validate_only: bool,
}

impl Cli {
    /// Run the pipeline, writing to the process stdout
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        self.execute(&mut stdout.lock())
    }

    /// Run the pipeline: load, validate, then render and write unless
    /// `validate_only` is set
    pub fn execute<W: Write>(&self, stdout: &mut W) -> Result<()> {
        let raw = load_config(&self.config)?;
        let config = validate(&raw)?;

        if self.validate_only {
            info!(config = %self.config.display(), "validate-only run, skipping render");
            writeln!(stdout, "Configuration {} is valid", self.config.display())?;
            return Ok(());
        }

        let renderer = TemplateRenderer::new(&self.template)?;
        let rendered = renderer.render(&config)?;

        write_output(&rendered, self.output.as_deref(), stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::Error;

    const VALID: &str = "policy_name: test\ntarget_namespace: ns1\npod_selector_labels: {app: x}\npolicy_types: [Ingress]\n";

    fn cli(dir: &Path, config: &str, template: &str) -> Cli {
        let config_path = dir.join("config.yaml");
        let template_path = dir.join("policy.yaml.j2");
        fs::write(&config_path, config).expect("config fixture should be written");
        fs::write(&template_path, template).expect("template fixture should be written");

        Cli {
            config: config_path,
            template: template_path,
            output: None,
            validate_only: false,
        }
    }

    #[test]
    fn test_defaults_match_shipped_files() {
        let cli = Cli::parse_from(["netpol-gen"]);
        assert_eq!(cli.config, PathBuf::from("example-config.yaml"));
        assert_eq!(cli.template, PathBuf::from("network-policy.yaml.j2"));
        assert!(cli.output.is_none());
        assert!(!cli.validate_only);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["netpol-gen", "-c", "a.yaml", "-t", "b.j2", "-o", "c.yaml", "-v"]);
        assert_eq!(cli.config, PathBuf::from("a.yaml"));
        assert_eq!(cli.template, PathBuf::from("b.j2"));
        assert_eq!(cli.output, Some(PathBuf::from("c.yaml")));
        assert!(cli.validate_only);
    }

    #[test]
    fn test_renders_to_stdout() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let cli = cli(dir.path(), VALID, "name: {{ policy_name }}\n");

        let mut stdout = Vec::new();
        cli.execute(&mut stdout).expect("pipeline should succeed");
        assert_eq!(stdout, b"name: test\n");
    }

    #[test]
    fn test_validate_only_skips_rendering() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        // An invalid template proves rendering never runs
        let mut cli = cli(dir.path(), VALID, "{{ not_a_variable }}");
        cli.validate_only = true;
        cli.output = Some(dir.path().join("out.yaml"));

        let mut stdout = Vec::new();
        cli.execute(&mut stdout).expect("validate-only should succeed");

        let message = String::from_utf8(stdout).expect("confirmation is UTF-8");
        assert!(message.contains("is valid"));
        assert!(!dir.path().join("out.yaml").exists());
    }

    #[test]
    fn test_invalid_config_never_reaches_template() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let mut cli = cli(
            dir.path(),
            "policy_name: test\ntarget_namespace: ns1\npod_selector_labels: {app: x}\npolicy_types: [Both]\n",
            "{{ policy_name }}",
        );
        cli.output = Some(dir.path().join("out.yaml"));

        let mut stdout = Vec::new();
        let err = cli.execute(&mut stdout).expect_err("invalid policy type must fail");

        assert!(matches!(err, Error::InvalidEnumValue { .. }));
        assert!(stdout.is_empty());
        assert!(!dir.path().join("out.yaml").exists());
    }

    #[test]
    fn test_missing_template_reported_after_validation() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let mut cli = cli(dir.path(), VALID, "");
        cli.template = dir.path().join("absent.j2");

        let err = cli
            .execute(&mut Vec::new())
            .expect_err("missing template must fail");
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }
}
