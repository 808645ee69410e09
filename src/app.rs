//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - opens the account store
//! - dispatches to the TUI or to a non-interactive report command

use std::path::Path;

use clap::Parser;

use crate::cli::{AuthArgs, Command};
use crate::error::AppError;
use crate::store::{AccountStore, StoreError};

/// Entry point for the `gpa` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `gpa` (and `gpa --data-file grades.json`) to behave like
    // `gpa tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Register(args) => handle_register(&args),
        Command::Gpa(args) => handle_report(&args, ReportKind::Gpa),
        Command::Credits(args) => handle_report(&args, ReportKind::Credits),
        Command::Crncr(args) => handle_report(&args, ReportKind::CrNcr),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Gpa,
    Credits,
    CrNcr,
}

fn handle_register(args: &AuthArgs) -> Result<(), AppError> {
    let store = open_store(args.data_file.as_deref());
    store
        .create(&args.username, &args.password)
        .map_err(store_error)?;
    println!("Account created successfully! You can now log in.");
    Ok(())
}

fn handle_report(args: &AuthArgs, kind: ReportKind) -> Result<(), AppError> {
    let store = open_store(args.data_file.as_deref());
    let courses = store
        .verify(&args.username, &args.password)
        .map_err(store_error)?;

    let text = match kind {
        ReportKind::Gpa => crate::report::format_cgpa(&courses),
        ReportKind::Credits => crate::report::format_remaining_credit(&courses),
        ReportKind::CrNcr => crate::report::format_cr_ncr(&courses),
    };
    print!("{text}");
    Ok(())
}

pub(crate) fn open_store(data_file: Option<&Path>) -> AccountStore {
    match data_file {
        Some(path) => AccountStore::new(path),
        None => AccountStore::from_env(),
    }
}

pub(crate) fn store_error(err: StoreError) -> AppError {
    let exit_code = match err {
        StoreError::AccountExists
        | StoreError::NotFound
        | StoreError::InvalidCredentials => 1,
        StoreError::Io(_) | StoreError::Corrupt(_) => 2,
    };
    AppError::new(exit_code, err.to_string())
}

/// Rewrite argv so `gpa` defaults to `gpa tui`.
///
/// Rules:
/// - `gpa`                       -> `gpa tui`
/// - `gpa --data-file x.json`    -> `gpa tui --data-file x.json`
/// - `gpa --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "tui" | "register" | "gpa" | "credits" | "crncr"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(args: &[&str]) -> Vec<String> {
        rewrite_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite(&["gpa"]), vec!["gpa", "tui"]);
        assert_eq!(
            rewrite(&["gpa", "--data-file", "x.json"]),
            vec!["gpa", "tui", "--data-file", "x.json"]
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite(&["gpa", "gpa", "-u", "a", "-p", "b"]),
            vec!["gpa", "gpa", "-u", "a", "-p", "b"]
        );
        assert_eq!(rewrite(&["gpa", "--help"]), vec!["gpa", "--help"]);
        assert_eq!(rewrite(&["gpa", "register"]), vec!["gpa", "register"]);
    }
}
