//! Integration tests for the public API

use helmsman::prelude::*;

#[test]
fn test_three_node_example() {
    let mut d = Diagram::new("Example", Direction::TopDown);
    let a = d.node(Category::Pod, "A");
    let b = d.node(Category::Pod, "B");
    let c = d.node(Category::Pod, "C");
    d.edge(a, b, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed))
        .unwrap();
    d.edge(b, c, EdgeAttr::new()).unwrap();

    assert_eq!(d.node_count(), 3);
    assert_eq!(d.edge_count(), 2);
    let edges = d.edges();
    assert_eq!(edges[0].attr.color, Some(Color::Red));
    assert_eq!(edges[0].attr.style, Some(EdgeStyle::Dashed));
    assert_eq!(edges[0].attr.label, None);
    assert_eq!(edges[1].attr.color, None);
    assert_eq!(edges[1].attr.style, None);
}

#[test]
fn test_draw_renders_exactly_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = RenderOptions::with_format(OutputFormat::Dot).out_dir(dir.path());

    let path = helmsman::draw("One Shot", Direction::LeftRight, &options, |d| {
        let workers = d.node_group(Category::Node, ["w1", "w2", "w3"]);
        let api = d.node(Category::ApiServer, "kube-apiserver");
        d.fan_out(api, &workers, EdgeAttr::new())
    })
    .unwrap();

    assert_eq!(path, dir.path().join("one_shot.dot"));
    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_loop_driven_construction() {
    // Repetition through ordinary iteration, no special machinery.
    let mut d = Diagram::new("Loop", Direction::TopDown);
    let scheduler = d.node(Category::Scheduler, "kube-scheduler");
    let mut zones = Vec::new();
    for zone in ["a", "b", "c"] {
        let node = d.cluster(format!("Zone {}", zone), |d| {
            Ok(d.node(Category::Node, format!("zone-{}", zone)))
        })
        .unwrap();
        zones.push(node);
    }
    d.fan_out(scheduler, &zones, EdgeAttr::new().label("maxSkew: 1"))
        .unwrap();

    assert_eq!(d.node_count(), 4);
    assert_eq!(d.edge_count(), 3);
    assert_eq!(d.cluster_count(), 3);
}

#[test]
fn test_node_handles_survive_cluster_scope() {
    let mut d = Diagram::new("Scopes", Direction::TopDown);
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
fn test_dangling_edge_is_rejected() {
    let mut owner = Diagram::new("Owner", Direction::TopDown);
    let mut other = Diagram::new("Other", Direction::TopDown);
    let local = owner.node(Category::Pod, "local");
    let foreign = other.node(Category::Pod, "foreign");

    assert!(owner.edge(local, foreign, EdgeAttr::new()).is_err());
    assert!(owner.edge(foreign, local, EdgeAttr::new()).is_err());
    assert_eq!(owner.edge_count(), 0);
}

#[test]
fn test_rebuild_produces_identical_structure() {
    let build = || {
        let mut d = Diagram::new("Stable", Direction::TopDown);
        d.cluster("Control Plane", |d| {
            let api = d.node(Category::ApiServer, "kube-apiserver");
            let etcd = d.node(Category::Etcd, "etcd");
            d.edge(api, etcd, EdgeAttr::new().color(Color::DarkGreen))
        })
        .unwrap();
        d
    };
    let first = build();
    let second = build();
    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first.clusters(), second.clusters());
    assert_eq!(first.to_dot(), second.to_dot());
}
