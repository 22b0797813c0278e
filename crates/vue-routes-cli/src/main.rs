mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use vue_routes::DEFAULT_MANIFEST;

#[derive(Parser)]
#[command(name = "vue-routes")]
#[command(version, about = "Generate Vue Router configuration from a route manifest", long_about = None)]
struct Cli {
    /// More log output (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the manifest and write the router module
    Generate {
        /// Route manifest to read
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Write here instead of output.destination
        #[arg(short, long)]
        output: Option<String>,

        /// Print the module instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the manifest and list its routes
    Check {
        /// Route manifest to read
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Print the route tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter manifest
    Init {
        /// Manifest path
        #[arg(default_value = DEFAULT_MANIFEST)]
        path: PathBuf,
    },

    /// Print the router module for a small built-in example
    Demo,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Execute command
    match cli.command {
        Commands::Generate {
            manifest,
            output,
            dry_run,
        } => {
            commands::generate::execute(&manifest, output, dry_run)?;
        }
        Commands::Check { manifest, json } => {
            commands::check::execute(&manifest, json)?;
        }
        Commands::Init { path } => {
            commands::init::execute(&path)?;
        }
        Commands::Demo => {
            commands::demo::execute()?;
        }
    }

    Ok(())
}
