use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use vue_routes::{FileWriter, RouteManifest, RouteTree};

pub fn execute(manifest_path: &Path, output: Option<String>, dry_run: bool) -> Result<()> {
    let mut manifest = RouteManifest::from_file(manifest_path)?;
    if let Some(destination) = output {
        manifest.output.destination = destination;
    }

    let mut tree: RouteTree<FileWriter> = manifest
        .build_tree()
        .with_context(|| format!("Invalid routes in {}", manifest_path.display()))?;

    if dry_run {
        tracing::debug!(routes = tree.len(), "dry run, not writing");
        print!("{}", tree.render());
        return Ok(());
    }

    tree.commit()?;

    println!(
        "  {} {} routes -> {}",
        "✓".green(),
        tree.len(),
        tree.destination().cyan()
    );
    Ok(())
}
