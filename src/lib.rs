//! citytime library root.
//! Exposes the converter core (validation engine, search, time math,
//! session wiring), the CLI parser, and a high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use std::path::Path;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Settings;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Convert { .. } => cli::commands::convert::handle(&cli.command),
        Commands::Search { .. } => cli::commands::search::handle(&cli.command),
        Commands::Select { .. } => cli::commands::select::handle(&cli.command, config_path),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, config_path),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // settings path: CLI override or the platform default
    let config_path = match &cli.config {
        Some(p) => utils::path::expand_tilde(p),
        None => Settings::config_file(),
    };

    dispatch(&cli, &config_path)
}
