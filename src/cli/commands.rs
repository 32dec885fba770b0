//! CLI command implementations.

use super::LintArgs;
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::core::commit::{Commit, DiffStats, LintInput, PullRequest};
use crate::core::error::{Error, Result};
use crate::core::git::GitRepo;
use crate::core::linter::{run_lint, CommitLinter};
use crate::core::report::{OutputFormat, Report};
use console::style;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Hook script template.
const HOOK_SCRIPT: &str = r#"#!/bin/sh
# pr-commit-lint hook - installed by `pcl install`
# https://github.com/pr-commit-lint/pr-commit-lint

# Skip if PCL_SKIP is set
if [ "$PCL_SKIP" = "1" ]; then
    exit 0
fi

exec pcl message "$1"
"#;

/// Hook marker comment.
const HOOK_MARKER: &str = "# pr-commit-lint hook";

/// Hook the linter installs itself as.
const HOOK_NAME: &str = "commit-msg";

/// Returns true if the user asked to skip all checks.
fn skip_requested() -> bool {
    if std::env::var("PCL_SKIP").ok().as_deref() == Some("1") {
        eprintln!("{} Skipping checks (PCL_SKIP=1)", style("•").cyan());
        return true;
    }
    false
}

/// Lint a pull request.
pub fn lint(args: &LintArgs) -> Result<ExitCode> {
    if skip_requested() {
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_or_default()?;

    let (commits, pr) = match (&args.input, &args.base) {
        (Some(path), _) => {
            let input = LintInput::load(path)?;
            let pr = PullRequest {
                title: args.title.clone().unwrap_or(input.pull_request.title),
                squash: args.squash || input.pull_request.squash,
            };
            (input.commits, pr)
        },
        (None, Some(base)) => {
            let repo = GitRepo::discover()?;
            let commits = repo.commits_in_range(base, &args.head)?;
            let pr = PullRequest {
                title: args.title.clone().unwrap_or_default(),
                squash: args.squash,
            };
            (commits, pr)
        },
        (None, None) => return Err(Error::NoInput),
    };

    let outcome = run_lint(&config, &commits, &pr);
    tracing::info!(
        commits = commits.len(),
        failed = outcome.failed_count(),
        "Lint finished"
    );

    finish(&outcome.report, args.format)
}

/// Lint a single commit message file.
pub fn message(file: &Path, squash: bool, format: Option<OutputFormat>) -> Result<ExitCode> {
    if skip_requested() {
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_or_default()?;
    let content = std::fs::read_to_string(file)
        .map_err(|e| Error::io(format!("read {}", file.display()), e))?;

    let commit = Commit::new("message", strip_comments(&content), DiffStats::default());
    let pr = PullRequest {
        title: String::new(),
        squash,
    };

    let mut report = Report::new();
    CommitLinter::new(&config, &pr).lint_commits(std::slice::from_ref(&commit), &mut report);

    finish(&report, format)
}

/// Renders the report and maps it to an exit code.
fn finish(report: &Report, format: Option<OutputFormat>) -> Result<ExitCode> {
    let format = format.unwrap_or_else(OutputFormat::detect);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.render(format, &mut out)?;
    out.flush().map_err(|e| Error::io("flush output", e))?;

    if report.failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Drops git's `#` comment lines and trailing blank lines from an edited message.
fn strip_comments(message: &str) -> String {
    let kept: Vec<&str> = message
        .lines()
        .take_while(|line| !line.starts_with("# ------------------------ >8"))
        .filter(|line| !line.starts_with('#'))
        .collect();

    kept.join("\n").trim_end().to_string()
}

/// Install git hook.
pub fn install(force: bool) -> Result<ExitCode> {
    let repo = GitRepo::discover()?;
    let hooks_dir = repo.hooks_dir();
    let hook_path = hooks_dir.join(HOOK_NAME);

    if !hooks_dir.exists() {
        std::fs::create_dir_all(&hooks_dir).map_err(|e| Error::io("create hooks dir", e))?;
    }

    if hook_path.exists() {
        let content =
            std::fs::read_to_string(&hook_path).map_err(|e| Error::io("read existing hook", e))?;

        if content.contains(HOOK_MARKER) {
            eprintln!(
                "{} Hook already installed at {}",
                style("✓").green(),
                hook_path.display()
            );
            return Ok(ExitCode::SUCCESS);
        }

        if !force {
            return Err(Error::HookExists { path: hook_path });
        }

        let backup_path = hooks_dir.join(format!("{HOOK_NAME}.bak"));
        std::fs::rename(&hook_path, &backup_path).map_err(|e| Error::io("backup hook", e))?;
        eprintln!(
            "{} Backed up existing hook to {}",
            style("•").cyan(),
            backup_path.display()
        );
    }

    std::fs::write(&hook_path, HOOK_SCRIPT).map_err(|e| Error::io("write hook", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&hook_path)
            .map_err(|e| Error::io("get hook metadata", e))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&hook_path, perms).map_err(|e| Error::io("set hook perms", e))?;
    }

    eprintln!(
        "{} Installed {HOOK_NAME} hook at {}",
        style("✓").green(),
        hook_path.display()
    );

    Ok(ExitCode::SUCCESS)
}

/// Uninstall git hook.
pub fn uninstall() -> Result<ExitCode> {
    let repo = GitRepo::discover()?;
    let hook_path = repo.hook_path(HOOK_NAME);

    if !hook_path.exists() {
        eprintln!(
            "{} No hook installed at {}",
            style("•").cyan(),
            hook_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let content = std::fs::read_to_string(&hook_path).map_err(|e| Error::io("read hook", e))?;

    if !content.contains(HOOK_MARKER) {
        eprintln!(
            "{} Hook at {} was not installed by pr-commit-lint",
            style("!").yellow(),
            hook_path.display()
        );
        eprintln!("  Remove manually if desired.");
        return Ok(ExitCode::FAILURE);
    }

    std::fs::remove_file(&hook_path).map_err(|e| Error::io("remove hook", e))?;

    eprintln!(
        "{} Removed {HOOK_NAME} hook from {}",
        style("✓").green(),
        hook_path.display()
    );

    let backup_path = repo.hooks_dir().join(format!("{HOOK_NAME}.bak"));
    if backup_path.exists() {
        eprintln!(
            "  Backup exists at {} - restore if needed",
            backup_path.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Initialize configuration.
pub fn init(force: bool) -> Result<ExitCode> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration already exists: {}",
            style("!").yellow(),
            config_path.display()
        );
        eprintln!("  Use --force to overwrite.");
        return Ok(ExitCode::FAILURE);
    }

    let toml = toml::to_string_pretty(&Config::default()).map_err(|e| Error::Internal {
        message: format!("Failed to serialize config: {e}"),
    })?;

    std::fs::write(&config_path, toml).map_err(|e| Error::io("write config", e))?;

    eprintln!("{} Created {}", style("✓").green(), config_path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Review and customize {CONFIG_FILE_NAME}");
    eprintln!("  2. Run: pcl lint --base origin/main");

    Ok(ExitCode::SUCCESS)
}

/// Validate configuration.
pub fn validate() -> Result<ExitCode> {
    match Config::load() {
        Ok(_) => {
            eprintln!("{} Configuration is valid", style("✓").green());
            Ok(ExitCode::SUCCESS)
        },
        Err(Error::ConfigNotFound { path }) => {
            eprintln!(
                "{} Configuration not found: {}",
                style("!").yellow(),
                path.display()
            );
            eprintln!("  Run: pcl init");
            Ok(ExitCode::FAILURE)
        },
        Err(e) => {
            eprintln!("{} Configuration validation failed: {e}", style("✗").red());
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Show configuration.
pub fn config(raw: bool) -> Result<ExitCode> {
    match Config::find_config_file() {
        Ok(path) => {
            eprintln!("Configuration file: {}", path.display());

            if raw {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io("read config", e))?;
                eprintln!();
                std::io::stdout()
                    .write_all(content.as_bytes())
                    .map_err(|e| Error::io("write output", e))?;
            }

            Ok(ExitCode::SUCCESS)
        },
        Err(Error::ConfigNotFound { .. }) => {
            eprintln!("{} No configuration file found, using defaults", style("!").yellow());
            if raw {
                std::io::stdout()
                    .write_all(Config::default_toml().as_bytes())
                    .map_err(|e| Error::io("write output", e))?;
            }
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => Err(e),
    }
}

/// Generate shell completions.
pub fn completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    clap_complete::generate(
        shell,
        &mut super::Cli::command(),
        "pcl",
        &mut std::io::stdout(),
    );
}
