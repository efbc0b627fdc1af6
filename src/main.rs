// Copyright 2026 Slate Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};

use slate_runtime::cli;

#[derive(Parser)]
#[command(
    name = "slate",
    about = "Slate — widget data resolver and HTML fragment renderer for e-paper dashboards",
    version,
    after_help = "Run 'slate <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a widget configuration to an HTML fragment on stdout
    Render {
        /// Widget configuration as inline JSON
        config: Option<String>,
        /// Read the widget configuration from a JSON file instead
        #[arg(long)]
        file: Option<std::path::PathBuf>,
    },
    /// List the known template identifiers
    Templates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("slate_runtime={default_level}").parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render { config, file } => {
            cli::render_cmd::run(config.as_deref(), file.as_deref()).await
        }
        Commands::Templates => cli::templates_cmd::run(),
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    result
}
