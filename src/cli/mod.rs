//! Command-line parsing for the GPA tracker.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the grade/credit math.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gpa", version, about = "Single-user GPA and credit tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI.
    ///
    /// Log in (or create the account), enter courses, and run the GPA,
    /// remaining-credit, and CR/NCR reports interactively.
    Tui(TuiArgs),
    /// Create the account record (with an empty course map).
    Register(AuthArgs),
    /// Print the cumulative GPA for the stored courses.
    Gpa(AuthArgs),
    /// Print credits completed and credits remaining toward the 20.0 target.
    Credits(AuthArgs),
    /// Print the remaining CR/NCR option budget and which courses used it.
    Crncr(AuthArgs),
}

/// Credentials and storage options shared by the non-interactive commands.
#[derive(Debug, Parser, Clone)]
pub struct AuthArgs {
    /// Account username.
    #[arg(short, long)]
    pub username: String,

    /// Account password (stored and compared in plaintext).
    #[arg(short, long)]
    pub password: String,

    /// Account data file (default: user_data.json, or $GRADEBOOK_DATA_FILE).
    #[arg(long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,
}

/// Options for the TUI.
#[derive(Debug, Parser, Clone, Default)]
pub struct TuiArgs {
    /// Account data file (default: user_data.json, or $GRADEBOOK_DATA_FILE).
    #[arg(long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,
}
