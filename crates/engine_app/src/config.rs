//! Query configuration, parsed from the command line.

use std::path::PathBuf;

use clap::Parser;

/// What to load and which components to look for.
#[derive(Debug, Clone, Parser)]
#[command(name = "engine_app", about = "Query components in a scene description")]
pub struct AppConfig {
    /// Path to a JSON scene description.
    pub scene: PathBuf,

    /// Global name of the component type to look for.
    #[arg(short = 't', long = "type")]
    pub component_type: String,

    /// Absolute path of the node to start from (defaults to the root).
    #[arg(short, long)]
    pub node: Option<String>,

    /// Search the node's whole subtree, not just the node itself.
    #[arg(short, long)]
    pub recursive: bool,

    /// Return every match instead of the first one.
    #[arg(short, long)]
    pub all: bool,

    /// Treat a missing component as an error. Only meaningful for
    /// single-match lookups.
    #[arg(long, conflicts_with = "all")]
    pub assert_exists: bool,
}
