//! # Lattice CLI Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `lattice` binary.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//! - Mapping the error taxonomy to the process exit code
//!
//! ## Architecture
//!
//! The application follows a modular command structure:
//! - Each top-level command (`create`, `backup`, `migrate`, ...) is a
//!   variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors propagate to this level, where `core::error::exit_code`
//!   turns them into the exit-code convention (0 success / clean abort,
//!   1 validation, 2 external operation, 130 interrupt)
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! lattice --help
//!
//! # Run a command with increased verbosity
//! lattice -vv migrate --from mongodb://a/app --to mongodb://b/app
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Handles specific command logic (create, backup, migrate, etc.)
mod common; // Contains shared utilities (db, archive, process, fs, etc.)
mod core; // Core infrastructure (errors, env document, templating)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "lattice",
    about = "Scaffolding and operations CLI for the Lattice framework",
    long_about = "Scaffold Lattice modules and provision, install, and migrate the\n\
                  backing database between environments.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    Create(commands::create::CreateArgs),
    Backup(commands::backup::BackupArgs),
    Restore(commands::restore::RestoreArgs),
    Migrate(commands::migrate::MigrateArgs),
    Install(commands::install::InstallArgs),
    Launch(commands::launch::LaunchArgs),
    Build(commands::build::BuildArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Create(args) => commands::create::handle_create(args).await,
        Commands::Backup(args) => commands::backup::handle_backup(args).await,
        Commands::Restore(args) => commands::restore::handle_restore(args).await,
        Commands::Migrate(args) => commands::migrate::handle_migrate(args).await,
        Commands::Install(args) => commands::install::handle_install(args).await,
        Commands::Launch(args) => commands::launch::handle_launch(args).await,
        Commands::Build(args) => commands::build::handle_build(args).await,
    };

    if let Err(e) = command_result {
        let code = crate::core::error::exit_code(&e);
        if code == 0 {
            // A clean, intentional abort (declined confirmation).
            println!("{}", e);
        } else {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(code);
    }
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn lattice_cmd() -> Command {
        Command::cargo_bin("lattice").expect("Failed to find lattice binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        lattice_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        lattice_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
