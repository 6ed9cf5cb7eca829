//! Structural checks over every gallery entry

use helmsman::gallery;
use helmsman::prelude::*;

#[test]
fn test_every_entry_builds() {
    for entry in gallery::all() {
        let diagram = (entry.build)()
            .unwrap_or_else(|e| panic!("`{}` failed to build: {}", entry.name, e));
        assert!(diagram.node_count() > 0, "`{}` has no nodes", entry.name);
        assert!(diagram.edge_count() > 0, "`{}` has no edges", entry.name);
    }
}

#[test]
fn test_every_edge_endpoint_is_declared() {
    for entry in gallery::all() {
        let diagram = (entry.build)().unwrap();
        let nodes = diagram.node_count() as u32;
        for edge in diagram.edges() {
            assert!(edge.from < nodes, "`{}` has a dangling source", entry.name);
            assert!(edge.to < nodes, "`{}` has a dangling target", entry.name);
        }
    }
}

#[test]
fn test_cluster_parents_are_valid() {
    for entry in gallery::all() {
        let diagram = (entry.build)().unwrap();
        let clusters = diagram.cluster_count();
        for (i, cluster) in diagram.clusters().iter().enumerate() {
            if let Some(parent) = cluster.parent {
                assert!(parent < i, "`{}` cluster {} has a forward parent", entry.name, i);
                assert!(parent < clusters);
            }
        }
        for node in diagram.nodes() {
            if let Some(cluster) = node.cluster {
                assert!(cluster < clusters, "`{}` node in unknown cluster", entry.name);
            }
        }
    }
}

#[test]
fn test_every_entry_is_deterministic() {
    for entry in gallery::all() {
        let first = (entry.build)().unwrap().to_dot();
        let second = (entry.build)().unwrap().to_dot();
        assert_eq!(first, second, "`{}` is not deterministic", entry.name);
    }
}

#[test]
fn test_every_entry_renders_dot_output() {
    let dir = tempfile::tempdir().unwrap();
    let options = RenderOptions::with_format(OutputFormat::Dot).out_dir(dir.path());
    for entry in gallery::all() {
        let diagram = (entry.build)().unwrap();
        let path = diagram.render(&options).unwrap();
        assert!(path.exists(), "`{}` wrote nothing", entry.name);
    }
    // One file per entry, distinct basenames.
    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), gallery::all().len());
}

#[test]
fn test_first_environment_structure() {
    let diagram = gallery::first_environment().unwrap();
    assert_eq!(diagram.node_count(), 8);
    assert_eq!(diagram.edge_count(), 7);
    assert_eq!(diagram.cluster_count(), 4);
    assert_eq!(diagram.output_basename(), "chapter01_lab01");
}

#[test]
fn test_metrics_server_structure() {
    let diagram = gallery::metrics_server().unwrap();
    assert_eq!(diagram.node_count(), 9);
    assert_eq!(diagram.edge_count(), 11);
    assert_eq!(diagram.cluster_count(), 4);
    assert_eq!(diagram.direction(), Direction::TopDown);
}

#[test]
fn test_ha_control_plane_structure() {
    // Three control plane replicas generated in a loop.
    let diagram = gallery::ha_control_plane().unwrap();
    assert_eq!(diagram.node_count(), 19);
    assert_eq!(diagram.edge_count(), 27);
    assert_eq!(diagram.cluster_count(), 5);
}

#[test]
fn test_configmap_management_pairs_environments() {
    let diagram = gallery::configmap_management().unwrap();
    // git -> ci, ci -> three configs, three config -> deployment pairs.
    assert_eq!(diagram.edge_count(), 7);
    let pairwise: Vec<_> = diagram.edges().iter().skip(4).collect();
    assert_eq!(pairwise.len(), 3);
    for edge in pairwise {
        assert_eq!(edge.attr.color, Some(Color::Red));
        assert_eq!(edge.attr.style, Some(EdgeStyle::Dotted));
    }
}

#[test]
fn test_undirected_edges_in_rbac_diagram() {
    let diagram = gallery::rbac_access_control().unwrap();
    assert!(
        diagram.edges().iter().any(|e| !e.attr.directed),
        "namespace scoping link should be undirected"
    );
}
