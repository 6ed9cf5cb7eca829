//! Graphviz engine driver
//!
//! The layout engine is an opaque external collaborator: DOT source goes in
//! on stdin, an image file comes out. A missing `dot` executable is reported
//! as a distinct, fatal error so the diagnostic names the real problem
//! instead of a generic IO failure.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::error::DiagramError;

/// Name of the Graphviz layout executable
pub const DOT_EXECUTABLE: &str = "dot";

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputFormat {
    /// Raster image (Graphviz `-Tpng`), the default
    #[default]
    Png,
    /// Vector image (Graphviz `-Tsvg`)
    Svg,
    /// Raw DOT source, written without invoking Graphviz
    Dot,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
        }
    }

    /// Graphviz `-T` argument, if this format goes through Graphviz
    pub fn dot_format(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Png => Some("png"),
            OutputFormat::Svg => Some("svg"),
            OutputFormat::Dot => None,
        }
    }
}

/// Options controlling where and how a diagram is rendered
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output format (PNG by default)
    pub format: OutputFormat,
    /// Directory the output file is written into
    pub out_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            out_dir: PathBuf::from("."),
        }
    }
}

impl RenderOptions {
    /// Options with a specific format, writing into the current directory
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Set the output directory
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }
}

/// Render DOT source to `<out_dir>/<basename>.<ext>`
///
/// For [`OutputFormat::Dot`] the source is written directly; otherwise it is
/// piped through the Graphviz `dot` executable.
pub fn render(
    source: &str,
    basename: &str,
    options: &RenderOptions,
) -> Result<PathBuf, DiagramError> {
    let path = options
        .out_dir
        .join(format!("{}.{}", basename, options.format.extension()));

    let Some(format) = options.format.dot_format() else {
        fs::write(&path, source)?;
        info!(path = %path.display(), "wrote DOT source");
        return Ok(path);
    };

    debug!(format = format, path = %path.display(), "invoking graphviz");
    let mut child = Command::new(DOT_EXECUTABLE)
        .arg(format!("-T{}", format))
        .arg("-o")
        .arg(&path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DiagramError::backend_missing(DOT_EXECUTABLE)
            } else {
                DiagramError::from(e)
            }
        })?;

    // stdin is piped above, so take() cannot fail
    child
        .stdin
        .take()
        .ok_or_else(|| DiagramError::render_error("failed to open graphviz stdin"))?
        .write_all(source.as_bytes())?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiagramError::render_error(format!(
            "{} exited with {}: {}",
            DOT_EXECUTABLE,
            output.status,
            stderr.trim()
        )));
    }

    info!(path = %path.display(), "rendered diagram");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::Dot.extension(), "dot");
    }

    #[test]
    fn test_output_format_dot_format() {
        assert_eq!(OutputFormat::Png.dot_format(), Some("png"));
        assert_eq!(OutputFormat::Svg.dot_format(), Some("svg"));
        assert_eq!(OutputFormat::Dot.dot_format(), None);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.format, OutputFormat::Png);
        assert_eq!(options.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_render_dot_writes_source() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions::with_format(OutputFormat::Dot).out_dir(dir.path());
        let path = render("digraph \"x\" {\n}\n", "sample", &options).unwrap();
        assert_eq!(path, dir.path().join("sample.dot"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "digraph \"x\" {\n}\n");
    }
}
