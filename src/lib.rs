//! netpol-gen - render Kubernetes NetworkPolicy manifests from configuration
//!
//! A single linear pipeline, run once per invocation:
//!
//! 1. [`config::load_config`] reads a YAML configuration file
//! 2. [`config::validate`] checks required fields and builds a
//!    [`config::PolicyConfig`]
//! 3. [`template::TemplateRenderer`] renders a Jinja template with the
//!    validated values
//! 4. [`output::write_output`] writes the document to a file or stdout
//!
//! Every stage returns [`Result`]; only the binary decides the exit status.
//! The tool never contacts a cluster, it only emits YAML text.
//!
//! # Modules
//!
//! - [`cli`] - Command-line arguments and the pipeline driver
//! - [`config`] - Configuration loading, validation and typed records
//! - [`template`] - Rendering context and template renderer
//! - [`output`] - File and stdout output
//! - [`error`] - Error types

#![deny(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod template;

pub use cli::Cli;
pub use error::{Error, Result};
