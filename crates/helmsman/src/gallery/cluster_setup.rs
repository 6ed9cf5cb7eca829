//! Cluster bootstrap diagrams: single-node setup, multi-node setup, and the
//! highly available control plane.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// First environment: one control plane node, one worker, one workload.
pub fn first_environment() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Kubernetes First Environment Setup", Direction::TopDown)
        .with_filename("chapter01_lab01");

    let api = d.cluster("Control Plane Node", |d| {
        let api = d.node(Category::ApiServer, "kube-apiserver");
        let etcd = d.node(Category::Etcd, "etcd");
        let scheduler = d.node(Category::Scheduler, "kube-scheduler");
        let controller = d.node(Category::ControllerManager, "kube-controller-manager");
        d.fan_out(api, &[etcd, scheduler, controller], EdgeAttr::new())?;
        Ok(api)
    })?;

    let kubelet = d.cluster("Worker Node", |d| {
        let (kubelet, runtime) = d.cluster("Node Components", |d| {
            let kubelet = d.node(Category::Node, "kubelet");
            let runtime = d.node(Category::ContainerRuntime, "container runtime");
            Ok((kubelet, runtime))
        })?;
        let (pod, svc) = d.cluster("Basic Workload", |d| {
            let pod = d.node(Category::Pod, "nginx-pod");
            let svc = d.node(Category::Service, "nginx-service");
            Ok((pod, svc))
        })?;

        d.edge(kubelet, runtime, EdgeAttr::new())?;
        d.edge(runtime, pod, EdgeAttr::new())?;
        d.edge(svc, pod, EdgeAttr::new())?;
        Ok(kubelet)
    })?;

    d.edge(api, kubelet, EdgeAttr::new())?;
    Ok(d)
}

/// Multi-node cluster: control plane and two workers behind a shared network.
pub fn multi_node_setup() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Multi-Node Kubernetes Cluster Setup", Direction::TopDown)
        .with_filename("ch03_lab01_cluster_setup");

    let net = d.node(Category::Internet, "Internet");
    let switch = d.node(Category::Switch, "Network\n10.0.0.0/24");

    let (host, api) = d.cluster("Control Plane Node (Ubuntu 20.04)", |d| {
        let host = d.node(Category::Os, "Control Plane\n2 CPU, 2GB RAM");
        let api = d.node(Category::ApiServer, "kube-apiserver");
        let etcd = d.node(Category::Etcd, "etcd");
        let controller = d.node(Category::ControllerManager, "controller-manager");
        let scheduler = d.node(Category::Scheduler, "scheduler");

        d.fan_out(
            host,
            &[api, etcd, controller, scheduler],
            EdgeAttr::new().color(Color::Black),
        )?;
        d.edge(api, etcd, EdgeAttr::new().color(Color::Red))?;
        Ok((host, api))
    })?;

    let workers = d.cluster("Worker Nodes", |d| {
        Ok(d.node_group(
            Category::Node,
            ["Worker 1\n2 CPU, 2GB RAM", "Worker 2\n2 CPU, 2GB RAM"],
        ))
    })?;

    d.edge(net, switch, EdgeAttr::new().color(Color::Blue))?;
    d.edge(switch, host, EdgeAttr::new().color(Color::Green))?;
    d.fan_out(switch, &workers, EdgeAttr::new().color(Color::Green))?;
    d.fan_out(
        api,
        &workers,
        EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed),
    )?;
    Ok(d)
}

/// Highly available control plane: three stacked control plane nodes behind a
/// load balancer. The three replicas are generated in a loop.
pub fn ha_control_plane() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("High Availability Kubernetes Control Plane", Direction::TopDown)
        .with_filename("ch03_lab02_ha_setup");

    let lb = d.node(Category::LoadBalancer, "HAProxy\nLoad Balancer\n(6443)");
    let switch = d.node(Category::Switch, "Internal Network\n192.168.1.0/24");

    let apis = d.cluster("Control Plane Nodes", |d| {
        let mut apis = Vec::new();
        for i in 1..=3 {
            let api = d.cluster(format!("Control Plane {}", i), |d| {
                let host = d.node(Category::Os, format!("Master {}\n2 CPU, 2GB RAM", i));
                let api = d.node(Category::ApiServer, "kube-apiserver");
                let etcd = d.node(Category::Etcd, "etcd");
                let controller = d.node(Category::ControllerManager, "controller-manager");
                let scheduler = d.node(Category::Scheduler, "scheduler");

                d.fan_out(
                    host,
                    &[api, etcd, controller, scheduler],
                    EdgeAttr::new().color(Color::Black),
                )?;
                d.edge(api, etcd, EdgeAttr::new().color(Color::Red))?;
                Ok(api)
            })?;
            apis.push(api);
        }
        Ok(apis)
    })?;

    let workers = d.cluster("Worker Nodes", |d| {
        Ok(d.node_group(
            Category::Node,
            ["Worker 1\n2 CPU, 2GB RAM", "Worker 2\n2 CPU, 2GB RAM"],
        ))
    })?;

    d.fan_out(lb, &apis, EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Bold))?;
    d.edge(switch, lb, EdgeAttr::new().color(Color::Green))?;
    d.fan_out(switch, &workers, EdgeAttr::new().color(Color::Green))?;
    for &api in &apis {
        d.fan_out(
            api,
            &workers,
            EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed),
        )?;
    }
    Ok(d)
}
