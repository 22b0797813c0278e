use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use vue_routes::{MemoryWriter, RouteManifest, RouteNode};

pub fn execute(manifest_path: &Path, json: bool) -> Result<()> {
    let manifest = RouteManifest::from_file(manifest_path)?;
    let tree = manifest
        .build_tree_with(MemoryWriter::new())
        .with_context(|| format!("Invalid routes in {}", manifest_path.display()))?;

    if json {
        let routes: Vec<&RouteNode> = tree.routes().collect();
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Manifest OK:".green().bold(),
        manifest_path.display()
    );
    println!("Destination: {}", tree.destination().cyan());
    println!();

    for top in tree.routes() {
        print_route(0, top);
        for (depth, node) in top.depth_first() {
            print_route(depth + 1, node);
        }
    }

    println!();
    println!("{} routes", tree.len());
    Ok(())
}

fn print_route(depth: usize, node: &RouteNode) {
    let name = if node.name().is_empty() {
        String::new()
    } else {
        format!(" ({})", node.name().yellow())
    };
    println!(
        "{}{}{} -> {}",
        "  ".repeat(depth + 1),
        node.path().bold(),
        name,
        node.component()
    );
}
