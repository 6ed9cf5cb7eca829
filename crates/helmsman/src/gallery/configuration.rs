//! Configuration management diagrams: ConfigMap and Secret distribution
//! across environments.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// ConfigMap management: a config repository feeding per-environment
/// ConfigMaps through CI, each mounted by the matching deployment.
pub fn configmap_management() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("ConfigMap Management Strategy", Direction::TopDown)
        .with_filename("ch05_lab02_configmap");

    d.cluster("Configuration Management", |d| {
        let git = d.node(Category::Repository, "Config Repository");
        let ci = d.node(Category::Pipeline, "CI/CD Pipeline");

        let cms = d.cluster("Environment Configurations", |d| {
            let cms = d.node_group(
                Category::ConfigMap,
                ["dev-config", "stage-config", "prod-config"],
            );
            d.edge(git, ci, EdgeAttr::new().color(Color::Blue).label("pull"))?;
            d.fan_out(ci, &cms, EdgeAttr::new().color(Color::Green).label("apply"))?;
            Ok(cms)
        })?;

        d.cluster("Application Deployments", |d| {
            let deploys = d.node_group(
                Category::Deployment,
                ["dev-app", "stage-app", "prod-app"],
            );
            // Each environment's config goes to exactly its own deployment.
            d.zip(
                &cms,
                &deploys,
                EdgeAttr::new().color(Color::Red).style(EdgeStyle::Dotted),
            )
        })
    })?;
    Ok(d)
}

/// Secret management: RBAC-gated access to per-environment secrets.
pub fn secret_management() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Secret Management Strategy", Direction::LeftRight)
        .with_filename("ch05_lab02_secrets");

    d.cluster("Secret Management", |d| {
        let (admin_role, dev_role) = d.cluster("Access Control", |d| {
            let admin = d.node(Category::User, "admin");
            let dev = d.node(Category::User, "developer");
            let admin_role = d.node(Category::Role, "secret-admin");
            let dev_role = d.node(Category::Role, "secret-reader");
            let admin_binding = d.node(Category::RoleBinding, "admin-binding");
            let dev_binding = d.node(Category::RoleBinding, "dev-binding");

            d.chain(&[admin, admin_binding, admin_role], EdgeAttr::new())?;
            d.chain(&[dev, dev_binding, dev_role], EdgeAttr::new())?;
            Ok((admin_role, dev_role))
        })?;

        let (dev_secret, prod_secret) = d.cluster("Secure Configurations", |d| {
            let dev_secret = d.cluster("Development", |d| {
                let ns = d.node(Category::Namespace, "dev");
                let secret = d.node(Category::Secret, "dev-secrets");
                d.link(ns, secret, EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dashed))?;
                Ok(secret)
            })?;
            let prod_secret = d.cluster("Production", |d| {
                let ns = d.node(Category::Namespace, "prod");
                let secret = d.node(Category::Secret, "prod-secrets");
                d.link(ns, secret, EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dashed))?;
                Ok(secret)
            })?;
            Ok((dev_secret, prod_secret))
        })?;

        d.fan_out(
            admin_role,
            &[dev_secret, prod_secret],
            EdgeAttr::new().color(Color::Green).label("full access"),
        )?;
        d.edge(
            dev_role,
            dev_secret,
            EdgeAttr::new()
                .color(Color::Blue)
                .style(EdgeStyle::Dashed)
                .label("read-only"),
        )
    })?;
    Ok(d)
}
