//! # engine_app — scene component query tool
//!
//! Loads a JSON scene description, declares its types, builds the node tree
//! and prints the components matching `--type`, one per line.
//!
//! ```text
//! engine_app scene.json --type Health --recursive --all
//! ```

mod config;
mod query;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use engine_scene::SceneDescription;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::parse();

    info!(scene = %config.scene.display(), "loading scene description");
    let text = std::fs::read_to_string(&config.scene)
        .with_context(|| format!("reading {}", config.scene.display()))?;
    let (registry, tree) = SceneDescription::from_json(&text)?.build()?;

    let hits = query::run(&config, &registry, &tree)?;
    info!(
        component_type = %config.component_type,
        matches = hits.len(),
        "query finished"
    );
    for hit in &hits {
        println!("{hit}");
    }
    Ok(())
}
