//! Core type definitions for diagram construction
//!
//! This module contains the fundamental types used throughout Helmsman:
//! layout direction, edge styling, node categories, and data structures.

use serde::Serialize;
use std::fmt;

/// Flow direction for the diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Direction {
    /// Top to bottom (TB)
    #[default]
    TopDown,
    /// Bottom to top (BT)
    BottomUp,
    /// Left to right (LR)
    LeftRight,
    /// Right to left (RL)
    RightLeft,
}

impl Direction {
    /// Parse direction from its short form (TB, TD, BT, LR, RL)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TB" | "TD" => Some(Direction::TopDown),
            "BT" => Some(Direction::BottomUp),
            "LR" => Some(Direction::LeftRight),
            "RL" => Some(Direction::RightLeft),
            _ => None,
        }
    }

    /// The `rankdir` value understood by Graphviz
    pub fn as_rankdir(&self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::BottomUp => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }

    /// Returns true if this is a vertical layout (TB or BT)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopDown | Direction::BottomUp)
    }

    /// Returns true if this is a horizontal layout (LR or RL)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_rankdir())
    }
}

/// Line style for edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Continuous line (Graphviz default)
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Heavy line
    Bold,
}

impl EdgeStyle {
    /// The `style` value understood by Graphviz
    pub fn as_dot(&self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Dotted => "dotted",
            EdgeStyle::Bold => "bold",
        }
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_dot())
    }
}

/// Edge colors, named after the Graphviz/X11 color scheme
///
/// The named variants cover the palette the gallery diagrams use; anything
/// else can be passed through with [`Color::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Firebrick,
    Green,
    DarkGreen,
    Blue,
    Orange,
    Brown,
    Purple,
    Gray,
    /// Any other Graphviz color name or `#rrggbb` value
    Custom(String),
}

impl Color {
    /// The color string understood by Graphviz
    pub fn as_dot(&self) -> &str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Firebrick => "firebrick",
            Color::Green => "green",
            Color::DarkGreen => "darkgreen",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Brown => "brown",
            Color::Purple => "purple",
            Color::Gray => "gray",
            Color::Custom(name) => name,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_dot())
    }
}

/// Resource family a node category belongs to
///
/// Families drive the visual grouping in the rendered image: every category
/// in a family shares a fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    ControlPlane,
    Infra,
    Compute,
    Network,
    Storage,
    Config,
    Rbac,
    Group,
    Observability,
    External,
}

impl Family {
    /// Fill color for nodes of this family
    pub fn fill_color(&self) -> &'static str {
        match self {
            Family::ControlPlane => "#c9daf8",
            Family::Infra => "#d9d2e9",
            Family::Compute => "#d9ead3",
            Family::Network => "#cfe2f3",
            Family::Storage => "#fce5cd",
            Family::Config => "#fff2cc",
            Family::Rbac => "#f4cccc",
            Family::Group => "#ead1dc",
            Family::Observability => "#d0e0e3",
            Family::External => "#f3f3f3",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::ControlPlane => "control-plane",
            Family::Infra => "infra",
            Family::Compute => "compute",
            Family::Network => "network",
            Family::Storage => "storage",
            Family::Config => "config",
            Family::Rbac => "rbac",
            Family::Group => "group",
            Family::Observability => "observability",
            Family::External => "external",
        };
        write!(f, "{}", name)
    }
}

/// Icon category for a node
///
/// One variant per component kind that appears in the diagrams. A node is a
/// single type tagged with a category; the category decides the node's shape
/// and fill color in the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    // Control plane
    ApiServer,
    Scheduler,
    ControllerManager,
    Etcd,
    // Cluster infrastructure
    Master,
    Node,
    // Workloads
    Pod,
    Container,
    Deployment,
    ReplicaSet,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
    Hpa,
    // Networking
    Service,
    Ingress,
    NetworkPolicy,
    Endpoint,
    // Storage
    PersistentVolume,
    PersistentVolumeClaim,
    StorageClass,
    Volume,
    Disk,
    // Pod configuration
    ConfigMap,
    Secret,
    // Access control
    ServiceAccount,
    Role,
    ClusterRole,
    RoleBinding,
    ClusterRoleBinding,
    User,
    UserGroup,
    // Grouping
    Namespace,
    CustomResource,
    // Observability
    Prometheus,
    Grafana,
    LogCollector,
    // Outside the cluster
    Internet,
    Switch,
    Firewall,
    LoadBalancer,
    Client,
    Users,
    ContainerRuntime,
    Registry,
    Database,
    WebServer,
    Pipeline,
    Repository,
    Os,
}

impl Category {
    /// The family this category belongs to
    pub fn family(&self) -> Family {
        use Category::*;
        match self {
            ApiServer | Scheduler | ControllerManager | Etcd => Family::ControlPlane,
            Master | Node => Family::Infra,
            Pod | Container | Deployment | ReplicaSet | StatefulSet | DaemonSet | Job
            | CronJob | Hpa => Family::Compute,
            Service | Ingress | NetworkPolicy | Endpoint => Family::Network,
            PersistentVolume | PersistentVolumeClaim | StorageClass | Volume | Disk => {
                Family::Storage
            }
            ConfigMap | Secret => Family::Config,
            ServiceAccount | Role | ClusterRole | RoleBinding | ClusterRoleBinding | User
            | UserGroup => Family::Rbac,
            Namespace | CustomResource => Family::Group,
            Prometheus | Grafana | LogCollector => Family::Observability,
            Internet | Switch | Firewall | LoadBalancer | Client | Users | ContainerRuntime
            | Registry | Database | WebServer | Pipeline | Repository | Os => Family::External,
        }
    }

    /// The node shape understood by Graphviz
    pub fn dot_shape(&self) -> &'static str {
        use Category::*;
        match self {
            Service | Endpoint | Internet | Client | Users => "oval",
            NetworkPolicy | Firewall => "diamond",
            Ingress => "trapezium",
            PersistentVolume | PersistentVolumeClaim | Volume | Disk | Etcd | Database => {
                "cylinder"
            }
            ConfigMap | Secret | StorageClass => "note",
            Namespace => "folder",
            CustomResource => "component",
            ServiceAccount | Role | ClusterRole | RoleBinding | ClusterRoleBinding | User
            | UserGroup => "hexagon",
            Master | Node => "box3d",
            _ => "box",
        }
    }

    /// Fill color, inherited from the category's family
    pub fn fill_color(&self) -> &'static str {
        self.family().fill_color()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A node in the diagram with all its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    /// Display label; duplicates are allowed and remain distinct nodes
    pub label: String,
    /// Icon category of the node
    pub category: Category,
    /// Index of the enclosing cluster, if any
    pub cluster: Option<usize>,
}

impl NodeData {
    /// Create a new top-level node
    pub fn new(category: Category, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category,
            cluster: None,
        }
    }
}

/// Visual styling attached to an edge
///
/// Mirrors the attributes a diagram declares on a connection: an optional
/// color, an optional line style, an optional text label, and whether the
/// edge carries an arrowhead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeAttr {
    /// Edge color, or the engine default when `None`
    pub color: Option<Color>,
    /// Line style, or the engine default when `None`
    pub style: Option<EdgeStyle>,
    /// Text label drawn next to the edge
    pub label: Option<String>,
    /// Whether the edge is drawn with an arrowhead
    pub directed: bool,
}

impl Default for EdgeAttr {
    fn default() -> Self {
        Self {
            color: None,
            style: None,
            label: None,
            directed: true,
        }
    }
}

impl EdgeAttr {
    /// A directed edge with engine-default color and style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge color
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the line style
    pub fn style(mut self, style: EdgeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the text label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Drop the arrowhead, making the edge undirected
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }
}

/// An edge connecting two nodes of the same diagram
///
/// Endpoints are indices into the owning diagram's node list; they are
/// validated when the edge is declared and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeData {
    /// Index of the source node
    pub from: u32,
    /// Index of the target node
    pub to: u32,
    /// Visual attributes of the edge
    pub attr: EdgeAttr,
}

/// A named visual container for nodes and sub-clusters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterData {
    /// Label shown on the cluster border
    pub name: String,
    /// Index of the parent cluster, if nested
    pub parent: Option<usize>,
}
