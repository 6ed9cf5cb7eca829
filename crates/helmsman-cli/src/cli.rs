//! Command-line interface for the helmsman utility
//!
//! Provides a CLI to list, render, and inspect the built-in gallery of
//! Kubernetes architecture diagrams.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use helmsman::core::logging::init_logging;
use helmsman::gallery::{self, GalleryEntry};
use helmsman::{Diagram, OutputFormat, RenderOptions};

/// Helmsman - render Kubernetes architecture diagrams through Graphviz
#[derive(Parser)]
#[command(name = "helmsman")]
#[command(about = "Render the built-in gallery of Kubernetes architecture diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the diagrams in the gallery
    List {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Render diagrams to image files
    Render {
        /// Names of the diagrams to render (see `list`)
        names: Vec<String>,

        /// Render every diagram in the gallery
        #[arg(long, conflicts_with = "names")]
        all: bool,

        /// Directory to write output files into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Output file format
        #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
        format: FormatChoice,
    },

    /// Print the graph structure of diagrams as JSON
    Describe {
        /// Names of the diagrams to describe (see `list`)
        names: Vec<String>,

        /// Describe every diagram in the gallery
        #[arg(long, conflicts_with = "names")]
        all: bool,

        /// Include full node and edge listings, not just counts
        #[arg(long)]
        full: bool,
    },
}

/// Supported output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    /// Raster image via Graphviz
    #[default]
    Png,
    /// Vector image via Graphviz
    Svg,
    /// Raw DOT source, no Graphviz required
    Dot,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Svg => OutputFormat::Svg,
            FormatChoice::Dot => OutputFormat::Dot,
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct HelmsmanApp;

impl HelmsmanApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags.
        let log_level_str = std::env::var("HELMSMAN_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("HELMSMAN_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Helmsman v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::List { json } => self.list_command(json),
            Commands::Render {
                names,
                all,
                out_dir,
                format,
            } => self.render_command(&names, all, &out_dir, format.into(), cli.verbose),
            Commands::Describe { names, all, full } => self.describe_command(&names, all, full),
        }
    }

    fn list_command(&self, json: bool) -> Result<()> {
        let entries = gallery::all();
        if json {
            let listing: Vec<_> = entries
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "name": e.name,
                        "summary": e.summary,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            for entry in entries {
                println!("{:<24} {}", entry.name, entry.summary);
            }
        }
        Ok(())
    }

    fn select(&self, names: &[String], all: bool) -> Result<Vec<GalleryEntry>> {
        if all {
            return Ok(gallery::all());
        }
        if names.is_empty() {
            bail!("no diagrams selected; pass names or --all (see `helmsman list`)");
        }
        names.iter().map(|name| Ok(gallery::find(name)?)).collect()
    }

    fn render_command(
        &self,
        names: &[String],
        all: bool,
        out_dir: &PathBuf,
        format: OutputFormat,
        verbose: bool,
    ) -> Result<()> {
        let entries = self.select(names, all)?;
        let options = RenderOptions { format, out_dir: out_dir.clone() };
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;

        for entry in entries {
            let diagram = (entry.build)()
                .with_context(|| format!("failed to build diagram `{}`", entry.name))?;
            let path = diagram
                .render(&options)
                .with_context(|| format!("failed to render diagram `{}`", entry.name))?;
            if verbose {
                eprintln!("{} -> {}", entry.name, path.display());
            }
        }
        Ok(())
    }

    fn describe_command(&self, names: &[String], all: bool, full: bool) -> Result<()> {
        let entries = self.select(names, all)?;
        let mut descriptions = Vec::new();
        for entry in entries {
            let diagram = (entry.build)()
                .with_context(|| format!("failed to build diagram `{}`", entry.name))?;
            descriptions.push(describe_diagram(entry.name, &diagram, full));
        }
        println!("{}", serde_json::to_string_pretty(&descriptions)?);
        Ok(())
    }
}

fn describe_diagram(name: &str, diagram: &Diagram, full: bool) -> serde_json::Value {
    let mut value = serde_json::json!({
        "name": name,
        "title": diagram.title(),
        "direction": diagram.direction().as_rankdir(),
        "output": diagram.output_basename(),
        "node_count": diagram.node_count(),
        "edge_count": diagram.edge_count(),
        "cluster_count": diagram.cluster_count(),
    });
    if full {
        let obj = value.as_object_mut().expect("describe payload is an object");
        obj.insert(
            "nodes".to_string(),
            serde_json::to_value(diagram.nodes()).unwrap_or_default(),
        );
        obj.insert(
            "edges".to_string(),
            serde_json::to_value(diagram.edges()).unwrap_or_default(),
        );
        obj.insert(
            "clusters".to_string(),
            serde_json::to_value(diagram.clusters()).unwrap_or_default(),
        );
    }
    value
}
