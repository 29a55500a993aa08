//! Rendered document output

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Write `rendered` to `destination`, or to `stdout` when no path is given
///
/// A file is created or truncated and written in a single call, then a
/// confirmation naming the path goes to `stdout`. Without a destination the
/// document is written to `stdout` verbatim with nothing else, so it can be
/// piped.
///
/// # Errors
///
/// - [`Error::Write`] if the destination file cannot be created or written
/// - [`Error::Io`] if writing to `stdout` fails
pub fn write_output<W: Write>(
    rendered: &str,
    destination: Option<&Path>,
    stdout: &mut W,
) -> Result<()> {
    match destination {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), bytes = rendered.len(), "policy written");
            writeln!(stdout, "NetworkPolicy written to {}", path.display())?;
        }
        None => stdout.write_all(rendered.as_bytes())?,
    }

    stdout.flush()?;
    Ok(())
}
