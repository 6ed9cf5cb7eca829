//! The diagram builder
//!
//! A [`Diagram`] owns every node, edge, and cluster declared within its
//! scope. Construction is immediate and unconditional: `node` appends a node
//! and hands back a [`NodeId`], the edge methods validate their endpoints and
//! append edges, and `cluster` runs a closure with the cluster pushed onto
//! the open-scope stack. On [`Diagram::render`] the accumulated graph is
//! emitted as DOT and handed to the layout engine exactly once.
//!
//! Fan conventions are explicit per method rather than inferred from operand
//! shapes: `fan_out` is 1→k, `fan_in` is m→1, `mesh` is the m×n broadcast,
//! and `zip` is strictly pairwise and rejects unequal lengths.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::dot;
use super::engine::{self, RenderOptions};
use super::error::DiagramError;
use super::types::{Category, ClusterData, Direction, EdgeAttr, EdgeData, NodeData};

static NEXT_DIAGRAM_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a node, valid only within the diagram that created it
///
/// The handle carries the owning diagram's stamp, so passing a handle from
/// one diagram into another fails edge validation instead of silently
/// connecting the wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    diagram: u64,
    index: u32,
}

impl NodeId {
    /// Position of the node in declaration order
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// An in-memory architecture diagram
///
/// # Example
///
/// ```rust
/// use helmsman::{Category, Color, Diagram, Direction, EdgeAttr, EdgeStyle};
///
/// let mut d = Diagram::new("Control Plane", Direction::TopDown);
/// let api = d.node(Category::ApiServer, "kube-apiserver");
/// let etcd = d.node(Category::Etcd, "etcd");
/// d.edge(api, etcd, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed))?;
/// assert_eq!(d.edge_count(), 1);
/// # Ok::<(), helmsman::DiagramError>(())
/// ```
#[derive(Debug)]
pub struct Diagram {
    id: u64,
    title: String,
    direction: Direction,
    filename: Option<String>,
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    clusters: Vec<ClusterData>,
    // Stack of currently open cluster indices; nodes attach to the top.
    scope: Vec<usize>,
}

impl Diagram {
    /// Open a new diagram scope with a title and layout direction
    pub fn new(title: impl Into<String>, direction: Direction) -> Self {
        let id = NEXT_DIAGRAM_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            title: title.into(),
            direction,
            filename: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            scope: Vec::new(),
        }
    }

    /// Override the output basename (defaults to a slug of the title)
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// The diagram title, drawn above the rendered image
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The layout direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of declared nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of declared edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of declared clusters
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// All declared nodes in declaration order
    pub fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    /// All declared edges in declaration order
    pub fn edges(&self) -> &[EdgeData] {
        &self.edges
    }

    /// All declared clusters in declaration order
    pub fn clusters(&self) -> &[ClusterData] {
        &self.clusters
    }

    /// Node data behind a handle, if the handle belongs to this diagram
    pub fn node_data(&self, id: NodeId) -> Option<&NodeData> {
        if id.diagram != self.id {
            return None;
        }
        self.nodes.get(id.index as usize)
    }

    /// Basename used for the output file
    ///
    /// The explicit filename wins; otherwise the title is slugged: lowercase,
    /// runs of non-alphanumeric characters collapsed to a single underscore.
    /// A title with no alphanumeric characters falls back to `diagram` so the
    /// output file always has a non-empty stem.
    pub fn output_basename(&self) -> String {
        if let Some(name) = &self.filename {
            return name.clone();
        }
        let mut slug = String::with_capacity(self.title.len());
        let mut pending_sep = false;
        for c in self.title.chars() {
            if c.is_alphanumeric() {
                if pending_sep && !slug.is_empty() {
                    slug.push('_');
                }
                pending_sep = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_sep = true;
            }
        }
        if slug.is_empty() {
            slug.push_str("diagram");
        }
        slug
    }

    /// Declare a labeled, categorized node
    ///
    /// The node attaches to the innermost open cluster. Duplicate labels are
    /// permitted and are distinct nodes.
    pub fn node(&mut self, category: Category, label: impl Into<String>) -> NodeId {
        let label = label.into();
        debug!(label = %label, category = %category, "declared node");
        let index = self.nodes.len() as u32;
        self.nodes.push(NodeData {
            label,
            category,
            cluster: self.scope.last().copied(),
        });
        NodeId {
            diagram: self.id,
            index,
        }
    }

    /// Declare several nodes of the same category, one per label
    pub fn node_group<I>(&mut self, category: Category, labels: I) -> Vec<NodeId>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        labels
            .into_iter()
            .map(|label| self.node(category, label))
            .collect()
    }

    /// Open a nested visual cluster, populate it inside the closure, and
    /// close it when the closure returns
    ///
    /// Clusters only affect rendering layout; they carry no semantics beyond
    /// visual containment. The closure receives the same diagram, so node
    /// handles created inside remain usable after the cluster closes.
    pub fn cluster<T, F>(&mut self, name: impl Into<String>, f: F) -> Result<T, DiagramError>
    where
        F: FnOnce(&mut Self) -> Result<T, DiagramError>,
    {
        let index = self.clusters.len();
        self.clusters.push(ClusterData {
            name: name.into(),
            parent: self.scope.last().copied(),
        });
        self.scope.push(index);
        let result = f(self);
        self.scope.pop();
        result
    }

    fn resolve(&self, id: NodeId) -> Result<u32, DiagramError> {
        if id.diagram != self.id {
            return Err(DiagramError::graph_error(
                "edge endpoint belongs to a different diagram",
            ));
        }
        if id.index as usize >= self.nodes.len() {
            return Err(DiagramError::graph_error(format!(
                "edge endpoint #{} was never declared",
                id.index
            )));
        }
        Ok(id.index)
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, attr: EdgeAttr) -> Result<(), DiagramError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        debug!(from, to, "declared edge");
        self.edges.push(EdgeData { from, to, attr });
        Ok(())
    }

    /// Declare one styled edge from `from` to `to`
    pub fn edge(&mut self, from: NodeId, to: NodeId, attr: EdgeAttr) -> Result<(), DiagramError> {
        self.push_edge(from, to, attr)
    }

    /// Declare one undirected edge between `a` and `b`
    pub fn link(&mut self, a: NodeId, b: NodeId, attr: EdgeAttr) -> Result<(), DiagramError> {
        self.push_edge(a, b, attr.undirected())
    }

    /// Connect `from` to every target: exactly `targets.len()` edges
    pub fn fan_out(
        &mut self,
        from: NodeId,
        targets: &[NodeId],
        attr: EdgeAttr,
    ) -> Result<(), DiagramError> {
        for &to in targets {
            self.push_edge(from, to, attr.clone())?;
        }
        Ok(())
    }

    /// Connect every source to `to`: exactly `sources.len()` edges
    pub fn fan_in(
        &mut self,
        sources: &[NodeId],
        to: NodeId,
        attr: EdgeAttr,
    ) -> Result<(), DiagramError> {
        for &from in sources {
            self.push_edge(from, to, attr.clone())?;
        }
        Ok(())
    }

    /// Connect every source to every target: `sources.len() * targets.len()`
    /// edges
    pub fn mesh(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
        attr: EdgeAttr,
    ) -> Result<(), DiagramError> {
        for &from in sources {
            for &to in targets {
                self.push_edge(from, to, attr.clone())?;
            }
        }
        Ok(())
    }

    /// Connect sources to targets pairwise
    ///
    /// Unlike `mesh`, this requires equal lengths; a mismatch is a usage
    /// error, not a silent broadcast.
    pub fn zip(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
        attr: EdgeAttr,
    ) -> Result<(), DiagramError> {
        if sources.len() != targets.len() {
            return Err(DiagramError::graph_error(format!(
                "zip requires equal lengths, got {} sources and {} targets",
                sources.len(),
                targets.len()
            )));
        }
        for (&from, &to) in sources.iter().zip(targets) {
            self.push_edge(from, to, attr.clone())?;
        }
        Ok(())
    }

    /// Connect consecutive nodes: `a >> b >> c` becomes two edges
    pub fn chain(&mut self, nodes: &[NodeId], attr: EdgeAttr) -> Result<(), DiagramError> {
        for pair in nodes.windows(2) {
            self.push_edge(pair[0], pair[1], attr.clone())?;
        }
        Ok(())
    }

    /// Emit the accumulated graph as deterministic DOT source
    pub fn to_dot(&self) -> String {
        dot::emit(self)
    }

    /// Render the diagram to an image file and discard it
    ///
    /// Consuming `self` guarantees the render fires at most once per diagram
    /// scope; the scope ends here.
    pub fn render(self, options: &RenderOptions) -> Result<PathBuf, DiagramError> {
        let source = self.to_dot();
        engine::render(&source, &self.output_basename(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, EdgeStyle};

    fn three_nodes(d: &mut Diagram) -> (NodeId, NodeId, NodeId) {
        let a = d.node(Category::Pod, "A");
        let b = d.node(Category::Pod, "B");
        let c = d.node(Category::Pod, "C");
        (a, b, c)
    }

    #[test]
    fn test_three_node_example() {
        // The worked example: A->B (red, dashed), B->C (defaults).
        let mut d = Diagram::new("Example", Direction::TopDown);
        let (a, b, c) = three_nodes(&mut d);
        d.edge(a, b, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed))
            .unwrap();
        d.edge(b, c, EdgeAttr::new()).unwrap();

        assert_eq!(d.node_count(), 3);
        assert_eq!(d.edge_count(), 2);
        assert_eq!(d.edges()[0].attr.color, Some(Color::Red));
        assert_eq!(d.edges()[0].attr.style, Some(EdgeStyle::Dashed));
        assert_eq!(d.edges()[1].attr.color, None);
        assert_eq!(d.edges()[1].attr.style, None);
    }

    #[test]
    fn test_duplicate_labels_are_distinct_nodes() {
        let mut d = Diagram::new("Dup", Direction::TopDown);
        let a = d.node(Category::Pod, "worker");
        let b = d.node(Category::Pod, "worker");
        assert_ne!(a, b);
        assert_eq!(d.node_count(), 2);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut d1 = Diagram::new("One", Direction::TopDown);
        let mut d2 = Diagram::new("Two", Direction::TopDown);
        let a = d1.node(Category::Pod, "a");
        let b = d2.node(Category::Pod, "b");
        let err = d1.edge(a, b, EdgeAttr::new()).unwrap_err();
        assert!(err.to_string().contains("different diagram"));
        assert_eq!(d1.edge_count(), 0);
    }

    #[test]
    fn test_fan_out_cardinality() {
        let mut d = Diagram::new("Fan", Direction::TopDown);
        let hub = d.node(Category::Service, "svc");
        let pods = d.node_group(Category::Pod, ["p1", "p2", "p3"]);
        d.fan_out(hub, &pods, EdgeAttr::new().color(Color::Blue))
            .unwrap();
        assert_eq!(d.edge_count(), 3);
        assert!(d.edges().iter().all(|e| e.from == hub.index()));
    }

    #[test]
    fn test_fan_in_cardinality() {
        let mut d = Diagram::new("Fan", Direction::TopDown);
        let pods = d.node_group(Category::Pod, ["p1", "p2"]);
        let sink = d.node(Category::LogCollector, "fluentd");
        d.fan_in(&pods, sink, EdgeAttr::new()).unwrap();
        assert_eq!(d.edge_count(), 2);
        assert!(d.edges().iter().all(|e| e.to == sink.index()));
    }

    #[test]
    fn test_mesh_is_broadcast() {
        let mut d = Diagram::new("Mesh", Direction::TopDown);
        let front = d.node_group(Category::Pod, ["f1", "f2"]);
        let back = d.node_group(Category::Pod, ["b1", "b2", "b3"]);
        d.mesh(&front, &back, EdgeAttr::new()).unwrap();
        assert_eq!(d.edge_count(), 6);
    }

    #[test]
    fn test_zip_requires_equal_lengths() {
        let mut d = Diagram::new("Zip", Direction::TopDown);
        let cms = d.node_group(Category::ConfigMap, ["dev", "stage", "prod"]);
        let deploys = d.node_group(Category::Deployment, ["dev-app", "stage-app"]);
        let err = d.zip(&cms, &deploys, EdgeAttr::new()).unwrap_err();
        assert!(err.to_string().contains("equal lengths"));
        assert_eq!(d.edge_count(), 0);

        let deploys = d.node(Category::Deployment, "prod-app");
        let all = vec![deploys; 3];
        d.zip(&cms, &all, EdgeAttr::new()).unwrap();
        assert_eq!(d.edge_count(), 3);
    }

    #[test]
    fn test_chain() {
        let mut d = Diagram::new("Chain", Direction::TopDown);
        let user = d.node(Category::User, "admin");
        let binding = d.node(Category::RoleBinding, "admin-binding");
        let role = d.node(Category::Role, "secret-admin");
        d.chain(&[user, binding, role], EdgeAttr::new()).unwrap();
        assert_eq!(d.edge_count(), 2);
        assert_eq!(d.edges()[0].from, user.index());
        assert_eq!(d.edges()[1].to, role.index());
    }

    #[test]
    fn test_cluster_scoping() {
        let mut d = Diagram::new("Scopes", Direction::TopDown);
        let outside = d.node(Category::Internet, "internet");
        d.cluster("Control Plane", |d| {
            let api = d.node(Category::ApiServer, "kube-apiserver");
            d.cluster("kube-system", |d| {
                let pod = d.node(Category::Pod, "metrics-server");
                d.edge(pod, api, EdgeAttr::new())
            })
        })
        .unwrap();

        assert_eq!(d.cluster_count(), 2);
        assert_eq!(d.nodes()[outside.index() as usize].cluster, None);
        assert_eq!(d.nodes()[1].cluster, Some(0));
        assert_eq!(d.nodes()[2].cluster, Some(1));
        assert_eq!(d.clusters()[1].parent, Some(0));
        // The scope stack unwound completely.
        let after = d.node(Category::Pod, "outside-again");
        assert_eq!(d.nodes()[after.index() as usize].cluster, None);
    }

    #[test]
    fn test_cluster_scope_unwinds_on_error() {
        let mut d = Diagram::new("Scopes", Direction::TopDown);
        let result: Result<(), DiagramError> = d.cluster("broken", |_| {
            Err(DiagramError::graph_error("boom"))
        });
        assert!(result.is_err());
        let after = d.node(Category::Pod, "top-level");
        assert_eq!(d.nodes()[after.index() as usize].cluster, None);
    }

    #[test]
    fn test_handles_usable_after_cluster_closes() {
        let mut d = Diagram::new("Handles", Direction::TopDown);
        let api = d
            .cluster("Control Plane", |d| {
                Ok(d.node(Category::ApiServer, "kube-apiserver"))
            })
            .unwrap();
        let kubelet = d.node(Category::Node, "kubelet");
        d.edge(api, kubelet, EdgeAttr::new()).unwrap();
        assert_eq!(d.edge_count(), 1);
    }

    #[test]
    fn test_output_basename_from_title() {
        let d = Diagram::new("Kubernetes First Environment Setup", Direction::TopDown);
        assert_eq!(d.output_basename(), "kubernetes_first_environment_setup");

        let d = Diagram::new("Lab 1: Pod Networking", Direction::TopDown);
        assert_eq!(d.output_basename(), "lab_1_pod_networking");

        let d = Diagram::new("A/B Testing", Direction::TopDown).with_filename("ch05_ab");
        assert_eq!(d.output_basename(), "ch05_ab");
    }

    #[test]
    fn test_output_basename_never_empty() {
        let d = Diagram::new("---", Direction::TopDown);
        assert_eq!(d.output_basename(), "diagram");

        let d = Diagram::new("", Direction::TopDown);
        assert_eq!(d.output_basename(), "diagram");
    }

    #[test]
    fn test_undirected_link() {
        let mut d = Diagram::new("Link", Direction::TopDown);
        let ns = d.node(Category::Namespace, "dev");
        let secret = d.node(Category::Secret, "dev-secrets");
        d.link(ns, secret, EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dashed))
            .unwrap();
        assert!(!d.edges()[0].attr.directed);
    }
}
