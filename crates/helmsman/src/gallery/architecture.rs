//! The core architecture overview: control plane, networking layer, worker
//! nodes, workload controllers, and the storage/config plane in one picture.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// Kubernetes core architecture, end to end.
pub fn core_architecture() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Kubernetes Core Architecture", Direction::TopDown)
        .with_filename("ch02_core_architecture");

    let inet = d.node(Category::Internet, "External Traffic");

    let (api, metrics) = d.cluster("Control Plane", |d| {
        let api = d.node(Category::ApiServer, "kube-apiserver");
        let etcd = d.node(Category::Etcd, "etcd");
        let ctrl_mgr = d.node(Category::ControllerManager, "controller-manager");
        let sched = d.node(Category::Scheduler, "scheduler");
        let metrics = d.node(Category::CustomResource, "metrics-server");

        d.edge(api, etcd, EdgeAttr::new().color(Color::DarkGreen).style(EdgeStyle::Bold))?;
        d.edge(api, ctrl_mgr, EdgeAttr::new().color(Color::Blue))?;
        d.edge(api, sched, EdgeAttr::new().color(Color::Red))?;
        d.edge(metrics, api, EdgeAttr::new().color(Color::Purple))?;
        Ok((api, metrics))
    })?;

    let (ingress, netpol) = d.cluster("Network Layer", |d| {
        let ingress = d.node(Category::Ingress, "ingress-controller");
        let netpol = d.node(Category::Firewall, "network-policy");
        Ok((ingress, netpol))
    })?;
    d.edge(inet, ingress, EdgeAttr::new().color(Color::Blue))?;

    let (pods1, pods2) = d.cluster("Worker Nodes", |d| {
        let pods1 = d.cluster("Node 1", |d| {
            d.node(Category::Node, "worker-1");
            Ok(d.node_group(Category::Pod, ["pod-1", "pod-2"]))
        })?;
        let pods2 = d.cluster("Node 2", |d| {
            d.node(Category::Node, "worker-2");
            Ok(d.node_group(Category::Pod, ["pod-3", "pod-4"]))
        })?;
        Ok((pods1, pods2))
    })?;
    d.fan_out(netpol, &pods1, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dotted))?;
    d.fan_out(netpol, &pods2, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dotted))?;

    let svc = d.cluster("Workload Controllers", |d| {
        let deploy = d.node(Category::Deployment, "deployment");
        let rs = d.node(Category::ReplicaSet, "replicaset");
        let svc = d.node(Category::Service, "service");
        let hpa = d.node(Category::Hpa, "hpa");

        d.edge(deploy, rs, EdgeAttr::new().color(Color::Blue))?;
        d.fan_out(rs, &pods1, EdgeAttr::new().color(Color::Blue))?;
        d.fan_out(rs, &pods2, EdgeAttr::new().color(Color::Blue))?;
        d.fan_out(svc, &pods1, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed))?;
        d.fan_out(svc, &pods2, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed))?;
        d.edge(hpa, deploy, EdgeAttr::new().color(Color::Green))?;
        d.edge(metrics, hpa, EdgeAttr::new().color(Color::Purple).style(EdgeStyle::Dotted))?;
        Ok(svc)
    })?;

    let (cm, secret) = d.cluster("Storage & Config", |d| {
        let pv = d.node(Category::PersistentVolume, "persistent-volume");
        let pvc = d.node(Category::PersistentVolumeClaim, "volume-claim");
        let cm = d.node(Category::ConfigMap, "configmap");
        let secret = d.node(Category::Secret, "secret");

        d.edge(pv, pvc, EdgeAttr::new().color(Color::Brown).label("binds"))?;
        Ok((cm, secret))
    })?;

    d.edge(ingress, svc, EdgeAttr::new().color(Color::Blue))?;
    d.fan_out(cm, &pods1, EdgeAttr::new().color(Color::Orange).style(EdgeStyle::Dotted))?;
    d.fan_out(secret, &pods1, EdgeAttr::new().color(Color::Orange).style(EdgeStyle::Dotted))?;
    d.edge(api, svc, EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dashed))?;
    Ok(d)
}
