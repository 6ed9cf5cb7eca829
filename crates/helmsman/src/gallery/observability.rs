//! Observability diagrams: metrics collection and the logging pipeline.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// Metrics Server: configuration, per-node collection, and the kubectl top
/// path through the API server.
pub fn metrics_server() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Metrics Server Architecture", Direction::TopDown)
        .with_filename("ch09_lab01_metrics_server");

    let (api, metrics) = d.cluster("Control Plane", |d| {
        let api = d.node(Category::ApiServer, "kube-apiserver");

        let metrics = d.cluster("kube-system namespace", |d| {
            d.node(Category::Namespace, "kube-system");
            let metrics = d.node(Category::Pod, "metrics-server");
            let config = d.node(Category::ConfigMap, "metrics-config");

            d.edge(
                config,
                metrics,
                EdgeAttr::new().color(Color::Brown).style(EdgeStyle::Dotted).label("configure"),
            )?;
            Ok(metrics)
        })?;
        Ok((api, metrics))
    })?;

    let (nodes, pods) = d.cluster("Worker Nodes", |d| {
        let node1 = d.node(Category::Node, "worker-node-1");
        let node2 = d.node(Category::Node, "worker-node-2");

        let pods = d.cluster("Application Pods", |d| {
            let pods = d.node_group(Category::Pod, ["app-pod-1", "app-pod-2", "app-pod-3"]);
            d.fan_out(
                node1,
                &pods[..2],
                EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dotted),
            )?;
            d.edge(
                node2,
                pods[2],
                EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dotted),
            )?;
            Ok(pods)
        })?;
        Ok((vec![node1, node2], pods))
    })?;

    d.fan_out(
        metrics,
        &nodes,
        EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Bold).label("collect metrics"),
    )?;
    d.fan_out(
        metrics,
        &pods,
        EdgeAttr::new().color(Color::Green).style(EdgeStyle::Bold).label("collect metrics"),
    )?;
    d.edge(
        metrics,
        api,
        EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed).label("store metrics"),
    )?;
    d.edge(api, metrics, EdgeAttr::new().color(Color::Orange).label("kubectl top"))?;
    Ok(d)
}

/// Cluster logging: application and system logs through Fluentd into
/// Elasticsearch, visualized in Kibana.
pub fn logging_pipeline() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Kubernetes Logging Architecture", Direction::LeftRight)
        .with_filename("ch09_lab04_logging");

    let (apps, system_logs) = d.cluster("Log Sources", |d| {
        let apps = d.cluster("Application Pods", |d| {
            Ok(d.node_group(Category::Pod, ["app-pod-1", "app-pod-2", "app-pod-3"]))
        })?;
        let system_logs = d.cluster("System Components", |d| {
            let node = d.node(Category::Node, "Worker Node");
            let system_logs = d.node(Category::Pod, "System Logs");
            d.edge(
                node,
                system_logs,
                EdgeAttr::new().color(Color::Brown).style(EdgeStyle::Dotted),
            )?;
            Ok(system_logs)
        })?;
        Ok((apps, system_logs))
    })?;

    let fluentd = d.cluster("Log Collection Layer", |d| {
        let fluentd = d.cluster("Fluentd DaemonSet", |d| {
            let fluentd = d.node(Category::LogCollector, "Fluentd");
            let config = d.node(Category::ConfigMap, "fluentd-config");
            d.edge(
                config,
                fluentd,
                EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dotted).label("configure"),
            )?;
            Ok(fluentd)
        })?;

        d.fan_in(&apps, fluentd, EdgeAttr::new().color(Color::Blue).label("container logs"))?;
        d.edge(
            system_logs,
            fluentd,
            EdgeAttr::new().color(Color::Blue).label("system logs"),
        )?;
        Ok(fluentd)
    })?;

    let es_svc = d.cluster("Elasticsearch Cluster", |d| {
        let es_svc = d.node(Category::Service, "elasticsearch-svc");
        let es_nodes = d.cluster("Elasticsearch Nodes", |d| {
            Ok(d.node_group(Category::Database, ["es-node-1", "es-node-2", "es-node-3"]))
        })?;
        d.fan_out(es_svc, &es_nodes, EdgeAttr::new().color(Color::Blue))?;
        Ok(es_svc)
    })?;

    let kibana = d.node(Category::Grafana, "Kibana");

    d.edge(
        fluentd,
        es_svc,
        EdgeAttr::new().color(Color::Green).style(EdgeStyle::Bold).label("forward"),
    )?;
    d.edge(kibana, es_svc, EdgeAttr::new().color(Color::Purple).label("query"))?;
    Ok(d)
}
