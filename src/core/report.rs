//! Lint diagnostics and their rendering.
//!
//! A [`Report`] collects diagnostics in the order the linter emits them. The
//! CLI renders it in one of the [`OutputFormat`]s; any fail-level diagnostic
//! turns into a non-zero exit status.

use crate::checks::Rule;
use crate::core::error::{Error, Result};
use console::style;
use serde::Serialize;
use std::io::Write;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the merge.
    Fail,
    /// Advisory only.
    Warn,
}

impl Severity {
    /// Returns a lower-case name for the severity.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity of the finding.
    pub severity: Severity,
    /// Rule that produced it.
    pub rule: Rule,
    /// Abbreviated hash of the offending commit, if commit-level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.commit {
            Some(commit) => write!(f, "{commit}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Diagnostics of one lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Markdown guidance block, present when any commit failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic for `rule` using the rule's severity.
    pub fn emit(&mut self, rule: Rule, commit: Option<&str>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            severity: rule.severity(),
            rule,
            commit: commit.map(str::to_string),
            message: message.into(),
        };

        match diagnostic.severity {
            Severity::Fail => tracing::debug!(rule = %rule, "fail: {diagnostic}"),
            Severity::Warn => tracing::debug!(rule = %rule, "warn: {diagnostic}"),
        }

        self.diagnostics.push(diagnostic);
    }

    /// Returns true if any fail-level diagnostic was recorded.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Returns fail-level diagnostics.
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Fail)
    }

    /// Returns warn-level diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warn)
    }

    /// Renders the report to `out` in the given format.
    pub fn render(&self, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        match format {
            OutputFormat::Text => self.render_text(out),
            OutputFormat::Json => self.render_json(out),
            OutputFormat::Github => self.render_github(out),
        }
        .map_err(|e| Error::io("write report", e))
    }

    fn render_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            let marker = match diagnostic.severity {
                Severity::Fail => style("✗").red(),
                Severity::Warn => style("!").yellow(),
            };
            writeln!(
                out,
                "{marker} {diagnostic} {}",
                style(format!("[{}]", diagnostic.rule)).dim()
            )?;
        }

        self.render_summary(out)?;

        let failures = self.failures().count();
        let warnings = self.warnings().count();
        if failures == 0 {
            writeln!(
                out,
                "{} Commit messages look good ({warnings} warning(s))",
                style("✓").green().bold()
            )
        } else {
            writeln!(
                out,
                "{} {failures} problem(s), {warnings} warning(s)",
                style("✗").red().bold()
            )
        }
    }

    fn render_json(&self, out: &mut impl Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    fn render_github(&self, out: &mut impl Write) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            let command = match diagnostic.severity {
                Severity::Fail => "error",
                Severity::Warn => "warning",
            };
            writeln!(
                out,
                "::{command} title={}::{}",
                escape_workflow_property(diagnostic.rule.name()),
                escape_workflow_data(&diagnostic.to_string())
            )?;
        }

        self.render_summary(out)
    }

    fn render_summary(&self, out: &mut impl Write) -> std::io::Result<()> {
        if let Some(summary) = &self.summary {
            writeln!(out)?;
            writeln!(out, "{summary}")?;
        }
        Ok(())
    }
}

/// Escapes a message for a GitHub Actions workflow command.
fn escape_workflow_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a property value (`key=value`) of a workflow command.
fn escape_workflow_property(value: &str) -> String {
    escape_workflow_data(value)
        .replace(':', "%3A")
        .replace(',', "%2C")
}

/// How a report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
    /// GitHub Actions workflow commands.
    Github,
}

impl OutputFormat {
    /// Picks a format from the environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with(|var| std::env::var_os(var).is_some())
    }

    /// Picks a format using `is_set` to query environment variables.
    #[must_use]
    pub fn detect_with(is_set: impl Fn(&str) -> bool) -> Self {
        if is_set("GITHUB_ACTIONS") {
            Self::Github
        } else {
            Self::Text
        }
    }
}
