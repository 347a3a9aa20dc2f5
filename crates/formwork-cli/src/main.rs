// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use formwork_cli::commands;
use formwork_cli::commands::submit::{SubmitArgs, DEFAULT_CONTENT_TYPE};
use formwork_cli::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formwork")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Declarative form submissions for content-driven sites", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Configuration file (defaults to ./formwork.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post a submission to a route and print the outcome
    Submit {
        /// Pages file (YAML mapping of route to page header)
        #[arg(long)]
        pages: PathBuf,
        /// Route the submission is posted to
        #[arg(long)]
        route: String,
        /// Request body
        #[arg(long)]
        body: String,
        /// Body content type
        #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
        content_type: String,
        /// Client IP address
        #[arg(long)]
        ip: Option<String>,
    },
    /// List forms in the cached registry
    Forms,
    /// Check the form declarations of a pages file
    Check {
        /// Pages file (YAML mapping of route to page header)
        #[arg(long)]
        pages: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Submit {
            pages,
            route,
            body,
            content_type,
            ip,
        } => commands::submit::run(
            &config,
            &SubmitArgs {
                pages: &pages,
                route: &route,
                body: &body,
                content_type: &content_type,
                ip: ip.as_deref(),
            },
        ),
        Commands::Forms => commands::forms::run(&config),
        Commands::Check { pages } => commands::check::run(&pages),
    }
}
