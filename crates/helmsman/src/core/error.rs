//! Core error types for diagram construction and rendering
//!
//! Failures fall into two camps: usage errors (an edge referencing a node
//! that was never declared in the same diagram, mismatched pairwise fans) and
//! environment errors (the Graphviz executable missing or failing). Both are
//! fatal; nothing here is retried.

use thiserror::Error;

/// Core error types for diagram construction and rendering
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Graph error: {message}")]
    GraphError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Graphviz executable `{executable}` not found on PATH; install graphviz to render images")]
    BackendMissing { executable: String },

    #[error("Unknown diagram: {name}")]
    UnknownDiagram { name: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new graph construction error
    pub fn graph_error(message: impl Into<String>) -> Self {
        Self::GraphError {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new missing-backend error
    pub fn backend_missing(executable: impl Into<String>) -> Self {
        Self::BackendMissing {
            executable: executable.into(),
        }
    }
}
