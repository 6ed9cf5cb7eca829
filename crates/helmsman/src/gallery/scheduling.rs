//! Scheduling diagrams: topology spread constraints and node affinity.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// Topology spread: web pods balanced across three zones, maxSkew 1.
pub fn topology_spread() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Topology Spread Constraints", Direction::TopDown)
        .with_filename("ch11_lab02_topology_spread");

    let zones = [
        ("Zone A", "Zone: us-east-1a", vec!["web-1\napp=web", "web-2\napp=web"]),
        ("Zone B", "Zone: us-east-1b", vec!["web-3\napp=web"]),
        ("Zone C", "Zone: us-east-1c", vec!["web-4\napp=web"]),
    ];

    let mut zone_nodes = Vec::new();
    for (cluster_name, node_label, pod_labels) in zones {
        let zone = d.cluster(cluster_name, |d| {
            let zone = d.node(Category::Node, node_label);
            let pods = d.node_group(Category::Pod, pod_labels);
            d.fan_out(zone, &pods, EdgeAttr::new().color(Color::Blue))?;
            Ok(zone)
        })?;
        zone_nodes.push(zone);
    }

    let scheduler = d.node(Category::Scheduler, "kube-scheduler");
    d.fan_out(
        scheduler,
        &zone_nodes,
        EdgeAttr::new().color(Color::Red).label("maxSkew: 1"),
    )?;
    Ok(d)
}

/// Node affinity: required and preferred placement rules against a mixed
/// node pool.
pub fn node_affinity() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Node Affinity Configuration", Direction::LeftRight)
        .with_filename("ch11_lab02_node_affinity");

    let nodes = d.cluster("Node Pool", |d| {
        Ok(d.node_group(
            Category::Node,
            [
                "GPU Node\ngpu-type=nvidia-tesla",
                "Memory Node\nmem-type=high",
                "Standard Node",
            ],
        ))
    })?;

    d.cluster("Workload Placement", |d| {
        let gpu_pod = d.node(
            Category::Pod,
            "GPU Workload\nrequiredDuringScheduling:\n  gpu-type=nvidia-tesla",
        );
        let mem_pod = d.node(
            Category::Pod,
            "Memory Intensive\npreferredDuringScheduling:\n  mem-type=high",
        );

        d.edge(
            gpu_pod,
            nodes[0],
            EdgeAttr::new().color(Color::Red).style(EdgeStyle::Bold).label("required"),
        )?;
        d.edge(
            mem_pod,
            nodes[1],
            EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Dashed).label("preferred"),
        )
    })?;
    Ok(d)
}
