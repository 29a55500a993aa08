//! File-backed template renderer
//!
//! Uses minijinja with standard Jinja delimiters:
//! - Variables: `{{ ... }}`
//! - Blocks: `{% ... %}`
//! - Comments: `{# ... #}`
//!
//! Templates load through a path loader rooted at the template's own
//! directory, so `{% include %}` and `{% extends %}` resolve sibling files.

use std::path::{Path, PathBuf};

use minijinja::{path_loader, AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use tracing::debug;

use super::context::RenderContext;
use crate::config::PolicyConfig;
use crate::error::{Error, Result};

/// Renders one template file against validated configurations
///
/// Supports:
/// - Strict undefined variable handling: a missing variable is an error,
///   never an empty string
/// - Trailing newlines in the template are kept in the output
/// - No auto-escaping, whatever the file extension
/// - Builtin filters, including `tojson` and `items`
pub struct TemplateRenderer {
    path: PathBuf,
    name: String,
    env: Environment<'static>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TemplateRenderer {
    /// Create a renderer for the template at `path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] if `path` is not an existing file.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(Error::TemplateNotFound { path });
        }

        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return Err(Error::TemplateNotFound { path }),
        };
        let dir = template_dir(&path);
        debug!(template = %name, dir = %dir.display(), "loading template");

        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        // `.yaml.j2` names would otherwise select JSON escaping.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Ok(Self { path, name, env })
    }

    /// Render the template with the variables of `config`
    ///
    /// # Errors
    ///
    /// - [`Error::TemplateNotFound`] if the file disappeared since [`Self::new`]
    /// - [`Error::Render`] on a syntax error, an undefined variable, or a
    ///   failing filter
    pub fn render(&self, config: &PolicyConfig) -> Result<String> {
        let template = self.env.get_template(&self.name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateNotFound {
                    path: self.path.clone(),
                }
            } else {
                self.render_error(source)
            }
        })?;

        let rendered = template
            .render(RenderContext::new(config).to_value())
            .map_err(|source| self.render_error(source))?;

        debug!(
            template = %self.name,
            bytes = rendered.len(),
            "template rendered"
        );
        Ok(rendered)
    }

    fn render_error(&self, source: minijinja::Error) -> Error {
        Error::Render {
            path: self.path.clone(),
            source,
        }
    }
}

/// Directory the loader resolves template names against
fn template_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
