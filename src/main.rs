//! Main entry point for the `pcl` CLI.

use pr_commit_lint::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            if !e.is_user_error() {
                eprintln!("  Run with --verbose or RUST_LOG=debug for details.");
            }
            ExitCode::from(e.exit_code())
        },
    }
}
