//! Command-line interface for pr-commit-lint.
//!
//! This module provides the `pcl` CLI with subcommands for:
//! - `lint`: Lint the commits of a pull request
//! - `message`: Lint a single commit message file
//! - `install`: Install the commit-msg hook
//! - `uninstall`: Remove the commit-msg hook
//! - `init`: Write a default configuration
//! - `validate`: Validate configuration

mod commands;

use crate::core::error::Result;
use crate::core::report::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Conventional-commit linting for pull requests.
#[derive(Debug, Parser)]
#[command(
    name = "pcl",
    author,
    version,
    about = "Conventional-commit linting for pull requests",
    long_about = r#"
pr-commit-lint (pcl) checks the commit messages of a pull request against
conventional-commit rules. Failures block the build; warnings are advisory.

Quick start:
  pcl lint --base origin/main             # Lint local commits
  pcl lint --input pr.json                # Lint commits supplied by CI
  pcl install                             # Lint every commit message locally

Environment variables:
  PCL_INPUT=FILE        Input document for `pcl lint`
  PCL_PR_TITLE=TITLE    Pull request title
  PCL_SQUASH=1          Pull request is squash merged
  PCL_SKIP=1            Skip all checks
"#,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Lint options used when no subcommand is given.
    #[command(flatten)]
    pub lint: LintArgs,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use color output.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Always use color.
    Always,
    /// Auto-detect color support.
    #[default]
    Auto,
    /// Never use color.
    Never,
}

/// Options of `pcl lint`.
#[derive(Debug, Clone, Args)]
pub struct LintArgs {
    /// JSON document with `pull_request` and `commits` ("-" for stdin).
    #[arg(short, long, env = "PCL_INPUT", conflicts_with = "base")]
    pub input: Option<PathBuf>,

    /// Lint the commits in BASE..HEAD of the local repository.
    #[arg(short, long)]
    pub base: Option<String>,

    /// Tip of the range to lint.
    #[arg(long, default_value = "HEAD")]
    pub head: String,

    /// Pull request title (overrides the input document).
    #[arg(short, long, env = "PCL_PR_TITLE")]
    pub title: Option<String>,

    /// The pull request is squash merged.
    #[arg(
        short,
        long,
        env = "PCL_SQUASH",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub squash: bool,

    /// Output format (default: github inside GitHub Actions, else text).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint the commits and title of a pull request.
    #[command(visible_alias = "l")]
    Lint(LintArgs),

    /// Lint a single commit message file.
    #[command(visible_alias = "m")]
    Message {
        /// File containing the commit message.
        file: PathBuf,

        /// Allow suggestion commits that will be squashed.
        #[arg(short, long)]
        squash: bool,

        /// Output format.
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Install the git commit-msg hook.
    Install {
        /// Overwrite existing hook.
        #[arg(short, long)]
        force: bool,
    },

    /// Remove the git commit-msg hook.
    Uninstall,

    /// Write a default configuration file.
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite existing configuration.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration file.
    #[command(visible_alias = "v")]
    Validate,

    /// Show configuration file location and contents.
    Config {
        /// Output raw TOML.
        #[arg(long)]
        raw: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Runs the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    setup_color(cli.color);

    // Without a subcommand, behave like `pcl lint`
    match cli.command {
        Some(Commands::Lint(args)) => commands::lint(&args),
        Some(Commands::Message {
            file,
            squash,
            format,
        }) => commands::message(&file, squash, format),
        Some(Commands::Install { force }) => commands::install(force),
        Some(Commands::Uninstall) => commands::uninstall(),
        Some(Commands::Init { force }) => commands::init(force),
        Some(Commands::Validate) => commands::validate(),
        Some(Commands::Config { raw }) => commands::config(raw),
        Some(Commands::Completions { shell }) => {
            commands::completions(shell);
            Ok(ExitCode::SUCCESS)
        },
        None => commands::lint(&cli.lint),
    }
}

/// Sets up logging based on verbosity flags.
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up color output.
fn setup_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        },
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        },
        ColorChoice::Auto => {
            // Let console crate auto-detect
        },
    }
}
