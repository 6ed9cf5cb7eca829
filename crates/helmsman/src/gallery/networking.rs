//! Networking diagrams: pod networking, service types, and network policies.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// Pod networking across two nodes, with DNS resolution paths.
pub fn pod_networking() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Lab 1: Pod Networking Architecture", Direction::TopDown)
        .with_filename("ch06_lab01_pod_networking");

    let inet = d.node(Category::Internet, "External\nNetwork");

    d.cluster("Kubernetes Cluster Network", |d| {
        let (switch1, pods1) = d.cluster("Node 1", |d| {
            let switch = d.node(Category::Switch, "Node Network");
            let pods = d.node_group(Category::Pod, ["pod-a\nnetshoot", "pod-b\nnginx"]);
            d.fan_out(switch, &pods, EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Bold))?;
            Ok((switch, pods))
        })?;

        let (switch2, pods2) = d.cluster("Node 2", |d| {
            let switch = d.node(Category::Switch, "Node Network");
            let pods = d.node_group(Category::Pod, ["pod-c\nnginx", "pod-d\nnetshoot"]);
            d.fan_out(switch, &pods, EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Bold))?;
            Ok((switch, pods))
        })?;

        let dns = d.node(Category::Service, "kube-dns\nService");

        d.fan_out(
            inet,
            &[switch1, switch2],
            EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed),
        )?;
        d.fan_out(dns, &pods1, EdgeAttr::new().color(Color::Green))?;
        d.fan_out(dns, &pods2, EdgeAttr::new().color(Color::Green))
    })?;
    Ok(d)
}

/// The three service types and their paths to the backing pods.
pub fn service_types() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Lab 2: Kubernetes Services Architecture", Direction::TopDown)
        .with_filename("ch06_lab02_services");

    let users = d.node(Category::Users, "External\nUsers");
    let inet = d.node(Category::Internet, "External\nNetwork");

    d.cluster("Kubernetes Cluster", |d| {
        let (clusterip, nodeport, loadbalancer) = d.cluster("Service Layer", |d| {
            let clusterip = d.node(Category::Service, "ClusterIP Service\nweb-service\n(internal)");
            let nodeport = d.node(Category::Service, "NodePort Service\nweb-service-np\n(30080)");
            let loadbalancer = d.node(Category::Service, "LoadBalancer Service\nweb-service-lb");
            Ok((clusterip, nodeport, loadbalancer))
        })?;

        let nodes = d.cluster("Node Pool", |d| {
            Ok(d.node_group(
                Category::Node,
                ["worker-node-1\nPort 30080", "worker-node-2\nPort 30080"],
            ))
        })?;

        let pods = d.cluster("Application Tier", |d| {
            let deploy = d.node(Category::Deployment, "web-app\nDeployment");
            let pods = d.node_group(
                Category::Pod,
                ["web-pod-1\nnginx", "web-pod-2\nnginx", "web-pod-3\nnginx"],
            );
            d.fan_out(deploy, &pods, EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dotted))?;
            Ok(pods)
        })?;

        let test_pod = d.node(Category::Pod, "test-pod\nbusybox");

        d.fan_out(clusterip, &pods, EdgeAttr::new().color(Color::Blue).label("port 80"))?;
        d.fan_out(nodeport, &pods, EdgeAttr::new().color(Color::Green).label("port 80"))?;
        d.fan_out(loadbalancer, &pods, EdgeAttr::new().color(Color::Orange).label("port 80"))?;

        d.edge(users, inet, EdgeAttr::new().color(Color::Blue))?;
        d.edge(inet, loadbalancer, EdgeAttr::new().color(Color::Red).style(EdgeStyle::Bold))?;
        d.fan_out(inet, &nodes, EdgeAttr::new().color(Color::Green).label("node port 30080"))?;
        d.edge(
            test_pod,
            clusterip,
            EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Dashed).label("internal access"),
        )
    })?;
    Ok(d)
}

/// Namespace-scoped network policies: default deny, selective allow, and a
/// blocked test namespace.
pub fn network_policies() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Lab 3: Network Policies", Direction::TopDown)
        .with_filename("ch06_lab03_network_policies");

    d.cluster("Kubernetes Cluster", |d| {
        let (frontend_pods, frontend_svc) = d.cluster("Frontend Namespace", |d| {
            d.node(Category::Namespace, "frontend");
            let pods = d.node_group(
                Category::Pod,
                ["frontend-pod-1\napp: frontend", "frontend-pod-2\napp: frontend"],
            );
            let svc = d.node(Category::Service, "frontend-service");
            let policy = d.node(Category::NetworkPolicy, "frontend-policy\nallow-ingress");

            d.fan_out(svc, &pods, EdgeAttr::new().color(Color::Blue))?;
            d.fan_out(
                policy,
                &pods,
                EdgeAttr::new().color(Color::Green).style(EdgeStyle::Dashed).label("allow 80,443"),
            )?;
            Ok((pods, svc))
        })?;

        let backend_svc = d.cluster("Backend Namespace", |d| {
            d.node(Category::Namespace, "backend");
            let pods = d.node_group(
                Category::Pod,
                ["backend-pod-1\napp: backend", "backend-pod-2\napp: backend"],
            );
            let svc = d.node(Category::Service, "backend-service");
            let default_deny = d.node(Category::NetworkPolicy, "default-deny-all");
            let policy = d.node(Category::NetworkPolicy, "backend-policy\nallow-from-frontend");

            d.fan_out(svc, &pods, EdgeAttr::new().color(Color::Blue))?;
            d.fan_out(
                default_deny,
                &pods,
                EdgeAttr::new().color(Color::Red).style(EdgeStyle::Bold).label("deny all"),
            )?;
            d.fan_out(
                policy,
                &pods,
                EdgeAttr::new()
                    .color(Color::Green)
                    .style(EdgeStyle::Dashed)
                    .label("allow from frontend"),
            )?;
            Ok(svc)
        })?;

        d.cluster("Test Namespace", |d| {
            d.node(Category::Namespace, "test");
            let test_pod = d.node(Category::Pod, "test-pod\napp: test");
            d.edge(
                test_pod,
                backend_svc,
                EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dotted).label("blocked"),
            )?;
            d.edge(
                test_pod,
                frontend_svc,
                EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dotted).label("blocked"),
            )
        })?;

        // The one permitted cross-namespace path.
        d.fan_in(
            &frontend_pods,
            backend_svc,
            EdgeAttr::new().color(Color::Green).label("allowed"),
        )
    })?;
    Ok(d)
}
