//! Error types for netpol-gen

use std::path::PathBuf;

use thiserror::Error;

/// Valid `policy_types` values, in the order they are reported to users
pub const POLICY_TYPE_OPTIONS: &[&str] = &["Ingress", "Egress"];

/// Errors produced by the render pipeline
///
/// Every variant is terminal for the current run. Stages return these to the
/// driver, which reports them and picks the exit status.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration path does not resolve to a file
    #[error("config file not found: {}", path.display())]
    ConfigNotFound {
        /// Path as given on the command line
        path: PathBuf,
    },

    /// The configuration file could not be read for a reason other than absence
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path as given on the command line
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not well-formed YAML, or is not a mapping
    #[error("failed to parse config file {}: {message}", path.display())]
    ConfigParse {
        /// Path as given on the command line
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A required top-level key is absent
    #[error("required field '{field}' is missing from the configuration")]
    MissingField {
        /// Name of the missing key
        field: &'static str,
    },

    /// A key holds a value of the wrong shape
    #[error("field '{field}' must be {expected}, found {found}")]
    WrongType {
        /// Dotted path to the offending value
        field: String,
        /// Shape the field requires
        expected: &'static str,
        /// Shape that was found
        found: &'static str,
    },

    /// A value is outside its fixed set of options
    #[error("invalid value '{value}' in '{field}', expected one of: {}", allowed.join(", "))]
    InvalidEnumValue {
        /// Field holding the value
        field: &'static str,
        /// Offending value as written in the config
        value: String,
        /// Accepted values
        allowed: &'static [&'static str],
    },

    /// The template file does not exist
    #[error("template not found: {}", path.display())]
    TemplateNotFound {
        /// Resolved template path
        path: PathBuf,
    },

    /// The template failed to parse or render
    #[error("failed to render template {}: {source}", path.display())]
    Render {
        /// Resolved template path
        path: PathBuf,
        /// Underlying minijinja error
        #[source]
        source: minijinja::Error,
    },

    /// The output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a wrong-type error for `field`
    pub fn wrong_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Create an invalid `policy_types` entry error
    pub fn invalid_policy_type(value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field: "policy_types",
            value: value.into(),
            allowed: POLICY_TYPE_OPTIONS,
        }
    }

    /// Process exit status for this error
    ///
    /// All failures share one status; callers only distinguish success from failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
