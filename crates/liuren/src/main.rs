// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liuren - Xiaoliuren divination service.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod divine;
mod serve;
mod shutdown;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

/// Liuren - Xiaoliuren divination with AI-personalized readings.
#[derive(Parser, Debug)]
#[command(name = "liuren", version, about, long_about = None)]
struct Cli {
    /// Explicit config file (skips the XDG lookup).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Run one divination and print the result as JSON.
    Divine {
        /// The question to ask.
        #[arg(default_value = "")]
        question: String,
        /// Local time to divine at, `YYYY-MM-DD HH:MM:SS` (defaults to now).
        #[arg(long, value_parser = parse_at)]
        at: Option<NaiveDateTime>,
    },
}

fn parse_at(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("`{value}` is not a `YYYY-MM-DD HH:MM:SS` time"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => liuren_config::load_and_validate_path(path),
        None => liuren_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            liuren_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Divine { question, at } => divine::run_divine(config, &question, at).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
