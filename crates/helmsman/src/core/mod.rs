//! Core abstractions for diagram construction
//!
//! This module contains the diagram builder, the DOT emitter, and the
//! Graphviz engine driver, plus the shared type and error definitions.

mod diagram;
mod dot;
mod engine;
mod error;
pub mod logging;
mod types;

pub use diagram::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use types::*;
