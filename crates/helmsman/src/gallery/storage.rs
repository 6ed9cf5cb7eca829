//! Storage diagrams: ephemeral emptyDir sharing and the PV/PVC binding chain.

use crate::core::{Category, Color, Diagram, DiagramError, Direction, EdgeAttr, EdgeStyle};

/// Two containers of one pod sharing an emptyDir volume.
pub fn emptydir_storage() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Lab 1: Pod Storage with EmptyDir", Direction::TopDown)
        .with_filename("ch07_lab01_emptydir");

    d.cluster("shared-volume-pod", |d| {
        let nginx = d.node(Category::WebServer, "container1\n(nginx)");
        let busybox = d.node(Category::Container, "container2\n(busybox)");

        let emptydir = d.cluster("volumes", |d| {
            Ok(d.node(Category::Volume, "shared-data\n(emptyDir)"))
        })?;

        d.edge(
            nginx,
            emptydir,
            EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Dashed).label("/data"),
        )?;
        d.edge(
            busybox,
            emptydir,
            EdgeAttr::new().color(Color::Green).style(EdgeStyle::Dashed).label("/data"),
        )?;
        d.edge(
            busybox,
            emptydir,
            EdgeAttr::new()
                .color(Color::Red)
                .style(EdgeStyle::Dotted)
                .label("writes timestamp.txt"),
        )?;
        d.edge(
            nginx,
            emptydir,
            EdgeAttr::new()
                .color(Color::Orange)
                .style(EdgeStyle::Dotted)
                .label("reads timestamp.txt"),
        )
    })?;
    Ok(d)
}

/// PersistentVolume and claim: host storage, the PV/PVC binding, and the pod
/// mounting the claim.
pub fn persistent_volumes() -> Result<Diagram, DiagramError> {
    let mut d = Diagram::new("Lab 2: PersistentVolumes and Claims", Direction::TopDown)
        .with_filename("ch07_lab02_pv_pvc");

    let storage = d.cluster("Host System", |d| {
        Ok(d.node(Category::Disk, "Physical Storage\n/mnt/data"))
    })?;

    let pvc = d.cluster("Storage Configuration", |d| {
        let pv = d.node(Category::PersistentVolume, "task-pv\n2Gi\nReadWriteOnce");
        let pvc = d.node(Category::PersistentVolumeClaim, "task-pvc\n1Gi\nReadWriteOnce");

        d.edge(
            storage,
            pv,
            EdgeAttr::new().color(Color::Brown).style(EdgeStyle::Bold).label("provides"),
        )?;
        d.edge(
            pv,
            pvc,
            EdgeAttr::new().color(Color::Blue).style(EdgeStyle::Bold).label("binds"),
        )?;
        Ok(pvc)
    })?;

    d.cluster("Application", |d| {
        let pod = d.node(Category::Pod, "task-pod");
        let nginx = d.node(Category::WebServer, "nginx-container");

        d.edge(pod, nginx, EdgeAttr::new().color(Color::Black).style(EdgeStyle::Dotted))?;
        d.edge(
            pvc,
            nginx,
            EdgeAttr::new()
                .color(Color::Green)
                .style(EdgeStyle::Dashed)
                .label("mounts as /usr/share/nginx/html"),
        )
    })?;
    Ok(d)
}
