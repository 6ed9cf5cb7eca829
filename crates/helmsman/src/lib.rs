//! Helmsman - declarative Kubernetes architecture diagrams
//!
//! A library for describing static architecture diagrams (control planes,
//! networking, storage, RBAC, observability) as labeled nodes, styled edges,
//! and nested visual clusters, then rendering them to image files through
//! the external Graphviz layout engine.
//!
//! # Quick Start
//!
//! ```rust
//! use helmsman::prelude::*;
//!
//! let mut d = Diagram::new("Control Plane", Direction::TopDown);
//! let (api, etcd) = d.cluster("Control Plane Node", |d| {
//!     let api = d.node(Category::ApiServer, "kube-apiserver");
//!     let etcd = d.node(Category::Etcd, "etcd");
//!     d.edge(api, etcd, EdgeAttr::new())?;
//!     Ok((api, etcd))
//! })?;
//! let kubelet = d.node(Category::Node, "kubelet");
//! d.edge(api, kubelet, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed))?;
//!
//! assert_eq!(d.node_count(), 3);
//! let dot = d.to_dot();
//! assert!(dot.contains("kube-apiserver"));
//! # let _ = etcd;
//! # Ok::<(), helmsman::DiagramError>(())
//! ```
//!
//! # Rendering
//!
//! Rendering consumes the diagram, so the engine is invoked exactly once per
//! diagram scope. [`draw`] bundles construction and rendering:
//!
//! ```rust,no_run
//! use helmsman::prelude::*;
//!
//! let path = helmsman::draw(
//!     "Metrics Server",
//!     Direction::TopDown,
//!     &RenderOptions::default(),
//!     |d| {
//!         let api = d.node(Category::ApiServer, "kube-apiserver");
//!         let metrics = d.node(Category::Pod, "metrics-server");
//!         d.edge(metrics, api, EdgeAttr::new().color(Color::Red).label("store metrics"))
//!     },
//! )?;
//! println!("wrote {}", path.display());
//! # Ok::<(), helmsman::DiagramError>(())
//! ```
//!
//! # Gallery
//!
//! The [`gallery`] module carries the built-in set of named diagram
//! definitions used as book illustrations; `gallery::all()` lists them and
//! each entry builds a complete [`Diagram`] without touching the filesystem.

pub mod core;
pub mod gallery;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle, Family,
        NodeId, OutputFormat, RenderOptions,
    };
}

use std::path::PathBuf;

/// Build a diagram inside a closure and render it on scope exit
///
/// The render fires exactly once, after the closure returns successfully;
/// a construction error aborts without rendering.
///
/// # Arguments
/// * `title` - Diagram title, also the source of the output basename
/// * `direction` - Layout direction
/// * `options` - Output format and directory
/// * `build` - Closure declaring nodes, edges, and clusters
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written image file
/// * `Err` - If construction or rendering fails
pub fn draw<F>(
    title: &str,
    direction: Direction,
    options: &RenderOptions,
    build: F,
) -> Result<PathBuf, DiagramError>
where
    F: FnOnce(&mut Diagram) -> Result<(), DiagramError>,
{
    let mut diagram = Diagram::new(title, direction);
    build(&mut diagram)?;
    diagram.render(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_writes_dot_output() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions::with_format(OutputFormat::Dot).out_dir(dir.path());
        let path = draw("Draw Smoke", Direction::LeftRight, &options, |d| {
            let a = d.node(Category::Pod, "a");
            let b = d.node(Category::Pod, "b");
            d.edge(a, b, EdgeAttr::new())
        })
        .unwrap();
        assert_eq!(path, dir.path().join("draw_smoke.dot"));
        assert!(path.exists());
    }

    #[test]
    fn test_draw_aborts_on_construction_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = RenderOptions::with_format(OutputFormat::Dot).out_dir(dir.path());
        let result = draw("Broken", Direction::TopDown, &options, |_| {
            Err(DiagramError::graph_error("nothing to draw"))
        });
        assert!(result.is_err());
        assert!(!dir.path().join("broken.dot").exists());
    }
}
