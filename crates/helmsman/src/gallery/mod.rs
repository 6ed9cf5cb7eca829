//! Built-in diagram definitions
//!
//! Each entry is a self-contained construction function producing one
//! complete [`Diagram`]; nothing here touches the filesystem. The registry
//! maps stable names (used by the CLI) to builders.

mod architecture;
mod cluster_setup;
mod configuration;
mod networking;
mod observability;
mod scheduling;
mod security;
mod storage;

pub use architecture::*;
pub use cluster_setup::*;
pub use configuration::*;
pub use networking::*;
pub use observability::*;
pub use scheduling::*;
pub use security::*;
pub use storage::*;

use crate::core::{Diagram, DiagramError};

/// A named diagram definition in the gallery
#[derive(Debug, Clone, Copy)]
pub struct GalleryEntry {
    /// Stable name used to select the entry from the CLI
    pub name: &'static str,
    /// One-line description
    pub summary: &'static str,
    /// Builds the complete diagram
    pub build: fn() -> Result<Diagram, DiagramError>,
}

/// All gallery entries, in rendering order
pub fn all() -> Vec<GalleryEntry> {
    vec![
        GalleryEntry {
            name: "first-environment",
            summary: "Single control plane node, one worker, one workload",
            build: first_environment,
        },
        GalleryEntry {
            name: "core-architecture",
            summary: "Control plane, networking, workers, and workload controllers",
            build: core_architecture,
        },
        GalleryEntry {
            name: "multi-node-setup",
            summary: "Control plane and two workers behind a shared network",
            build: multi_node_setup,
        },
        GalleryEntry {
            name: "ha-control-plane",
            summary: "Three stacked control plane nodes behind a load balancer",
            build: ha_control_plane,
        },
        GalleryEntry {
            name: "configmap-management",
            summary: "Per-environment ConfigMaps flowing from a config repository",
            build: configmap_management,
        },
        GalleryEntry {
            name: "secret-management",
            summary: "RBAC-gated access to per-environment secrets",
            build: secret_management,
        },
        GalleryEntry {
            name: "pod-networking",
            summary: "Pod networking across two nodes with DNS paths",
            build: pod_networking,
        },
        GalleryEntry {
            name: "service-types",
            summary: "ClusterIP, NodePort, and LoadBalancer services",
            build: service_types,
        },
        GalleryEntry {
            name: "network-policies",
            summary: "Default deny, selective allow, and a blocked namespace",
            build: network_policies,
        },
        GalleryEntry {
            name: "emptydir-storage",
            summary: "Two containers sharing an emptyDir volume",
            build: emptydir_storage,
        },
        GalleryEntry {
            name: "persistent-volumes",
            summary: "Host storage, PV/PVC binding, and the mounting pod",
            build: persistent_volumes,
        },
        GalleryEntry {
            name: "rbac-access-control",
            summary: "The RBAC chain from user to allowed verbs",
            build: rbac_access_control,
        },
        GalleryEntry {
            name: "metrics-server",
            summary: "Metrics collection and the kubectl top path",
            build: metrics_server,
        },
        GalleryEntry {
            name: "logging-pipeline",
            summary: "Logs through Fluentd into Elasticsearch and Kibana",
            build: logging_pipeline,
        },
        GalleryEntry {
            name: "topology-spread",
            summary: "Web pods balanced across three zones",
            build: topology_spread,
        },
        GalleryEntry {
            name: "node-affinity",
            summary: "Required and preferred placement rules",
            build: node_affinity,
        },
    ]
}

/// Look up a gallery entry by name
pub fn find(name: &str) -> Result<GalleryEntry, DiagramError> {
    all()
        .into_iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| DiagramError::UnknownDiagram {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        let entries = all();
        let mut names: Vec<_> = entries.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries.len());
    }

    #[test]
    fn test_find_known_entry() {
        let entry = find("metrics-server").unwrap();
        assert_eq!(entry.name, "metrics-server");
    }

    #[test]
    fn test_find_unknown_entry() {
        let err = find("no-such-diagram").unwrap_err();
        assert!(err.to_string().contains("no-such-diagram"));
    }
}
