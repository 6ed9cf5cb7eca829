//! Access-control diagrams: the RBAC chain from user to allowed verbs.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// RBAC configuration: a namespaced role, its binding, and the authorization
/// flow through the API server.
pub fn rbac_access_control() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("RBAC Configuration Lab", Direction::TopDown)
        .with_filename("ch08_lab02_rbac");

    let api = d.cluster("Kubernetes Control Plane", |d| {
        Ok(d.node(Category::ApiServer, "kube-apiserver"))
    })?;

    let (ns, role) = d.cluster("Development Namespace", |d| {
        let ns = d.node(Category::Namespace, "development");

        let role = d.cluster("RBAC Configuration", |d| {
            let role = d.node(Category::Role, "pod-manager\n[pods, pods/log]");
            let binding = d.node(Category::RoleBinding, "pod-manager-binding");
            let user = d.node(Category::User, "john");

            let actions = d.cluster("Allowed Actions", |d| {
                Ok(d.node_group(
                    Category::Pod,
                    ["get", "list", "watch", "create", "update", "delete"],
                ))
            })?;

            d.edge(user, binding, EdgeAttr::new().color(Color::Blue).label("bound to"))?;
            d.edge(binding, role, EdgeAttr::new().color(Color::Green).label("references"))?;
            d.fan_out(role, &actions, EdgeAttr::new().color(Color::Orange).label("allows"))?;
            Ok(role)
        })?;
        Ok((ns, role))
    })?;

    d.cluster("Authorization Process", |d| {
        let auth_check = d.node(Category::Pod, "Authorization Check");
        d.edge(
            api,
            auth_check,
            EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed).label("1. Verify"),
        )?;
        d.edge(
            auth_check,
            role,
            EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dashed).label("2. Check"),
        )
    })?;

    d.link(
        ns,
        role,
        EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dotted).label("scoped to"),
    )?;
    d.edge(
        api,
        ns,
        EdgeAttr::new().color(Color::DarkGreen).style(EdgeStyle::Bold).label("3. Enforce"),
    )?;
    Ok(d)
}
