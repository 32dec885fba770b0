//! Commit message linting for a pull request.
//!
//! [`CommitLinter`] evaluates every commit against the rule set in a single
//! synchronous pass. Rules never short-circuit each other; only the ignored
//! prefix check skips a commit entirely. Diagnostics go to the [`Report`] the
//! moment a rule rejects something.

use crate::checks::Rule;
use crate::config::{Config, RulesConfig};
use crate::core::commit::{Commit, PullRequest};
use crate::core::report::Report;
use crate::core::subject::{self, SemanticMatch};
use regex::Regex;
use std::sync::OnceLock;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"))
}

/// Outcome of linting one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintResult {
    /// True iff at least one rule rejected the commit.
    pub failed: bool,
    /// Diagnostic messages, in rule order.
    pub messages: Vec<String>,
}

impl LintResult {
    fn reject(&mut self, report: &mut Report, rule: Rule, commit: &Commit, message: String) {
        self.failed = true;
        report.emit(rule, Some(commit.short_id()), message.clone());
        self.messages.push(message);
    }
}

/// Result of a full lint run.
#[derive(Debug, Clone, Default)]
pub struct LintOutcome {
    /// Per-commit results, in input order, keyed by commit id.
    pub commits: Vec<(String, LintResult)>,
    /// Every diagnostic, in emission order.
    pub report: Report,
}

impl LintOutcome {
    /// Returns true if no fail-level diagnostic was emitted.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.report.failed()
    }

    /// Returns the number of commits that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.commits.iter().filter(|(_, r)| r.failed).count()
    }
}

/// Lints the commits and title of one pull request.
#[derive(Debug)]
pub struct CommitLinter<'a> {
    rules: &'a RulesConfig,
    docs_url: &'a str,
    pr: &'a PullRequest,
}

impl<'a> CommitLinter<'a> {
    /// Creates a linter for `pr` using the rules from `config`.
    #[must_use]
    pub fn new(config: &'a Config, pr: &'a PullRequest) -> Self {
        Self {
            rules: &config.rules,
            docs_url: &config.report.docs_url,
            pr,
        }
    }

    /// Runs every check against the pull request and its commits.
    pub fn run(&self, commits: &[Commit]) -> LintOutcome {
        let mut report = Report::new();

        tracing::debug!(
            commits = commits.len(),
            squash = self.pr.squash,
            "Linting pull request"
        );

        let results = self.lint_commits(commits, &mut report);
        self.lint_pr(&mut report);
        self.check_commit_count(commits.len(), &mut report);

        LintOutcome {
            commits: commits.iter().map(|c| c.id.clone()).zip(results).collect(),
            report,
        }
    }

    /// Lints every commit and adds the guidance summary if any failed.
    pub fn lint_commits(&self, commits: &[Commit], report: &mut Report) -> Vec<LintResult> {
        let results: Vec<_> = commits
            .iter()
            .map(|commit| self.lint_commit(commit, report))
            .collect();

        if results.iter().any(|r| r.failed) {
            report.summary = Some(summary_markdown(self.rules, self.docs_url));
        }

        results
    }

    /// Lints a single commit.
    pub fn lint_commit(&self, commit: &Commit, report: &mut Report) -> LintResult {
        let mut result = LintResult::default();

        if self.rules.is_ignored(&commit.message) {
            tracing::debug!(commit = commit.short_id(), "Skipping generated commit");
            return result;
        }

        let parts = commit.parts();
        let subject = parts.subject;
        let max_subject = self.rules.max_subject_length;

        if subject.chars().count() > max_subject {
            result.reject(
                report,
                Rule::SubjectLength,
                commit,
                format!("The commit subject may not be longer than {max_subject} characters"),
            );
        }

        if subject.starts_with("Apply suggestion to") && !self.pr.squash {
            result.reject(
                report,
                Rule::SquashSuggestion,
                commit,
                "This commit applies a suggestion; enable squash merging or squash it into \
                 the commit it amends"
                    .to_string(),
            );
        }

        if subject.ends_with('.') {
            result.reject(
                report,
                Rule::TrailingPeriod,
                commit,
                "The commit subject must not end with a period".to_string(),
            );
        }

        if parts.separator.is_some_and(|s| !s.is_empty()) {
            result.reject(
                report,
                Rule::Separator,
                commit,
                "The commit subject and body must be separated by a blank line".to_string(),
            );
        }

        if let Some(details) = parts.details {
            // Details start on the third line of the message
            for (index, _) in details
                .lines()
                .enumerate()
                .filter(|(_, line)| self.line_too_long(line))
            {
                result.reject(
                    report,
                    Rule::BodyLineLength,
                    commit,
                    format!(
                        "Line {} of the commit message is longer than {} characters",
                        index + 3,
                        self.rules.max_body_line_length
                    ),
                );
            }
        } else if self.is_large_change(commit) {
            result.reject(
                report,
                Rule::MissingBody,
                commit,
                format!(
                    "Commits that change {} or more lines across more than {} files must \
                     describe these changes in the commit body",
                    self.rules.large_diff_lines, self.rules.large_diff_files
                ),
            );
        }

        match subject::parse(subject) {
            SemanticMatch::Unmatched => result.reject(
                report,
                Rule::ConventionalFormat,
                commit,
                "The commit subject does not comply with conventional commits".to_string(),
            ),
            SemanticMatch::Matched { kind, .. } if !self.rules.is_known_type(kind) => result
                .reject(
                    report,
                    Rule::KnownType,
                    commit,
                    format!("'{kind}' is not a well-known semantic commit type"),
                ),
            SemanticMatch::Matched { .. } => {},
        }

        result
    }

    /// Checks the pull request title when it becomes the squash commit message.
    pub fn lint_pr(&self, report: &mut Report) {
        if !self.pr.squash {
            return;
        }

        let title = subject::strip_wip(&self.pr.title);

        match subject::parse(title).kind() {
            None => report.emit(
                Rule::PrTitle,
                None,
                "The pull request title does not comply with conventional commits; it becomes \
                 the commit message when squash merging",
            ),
            Some(kind) if !self.rules.is_known_type(kind) => {
                report.emit(
                    Rule::PrTitle,
                    None,
                    format!(
                        "The pull request title uses '{kind}', which is not a well-known \
                         semantic commit type"
                    ),
                );
            },
            Some(_) => {},
        }
    }

    /// Suggests a rebase when the pull request has many commits.
    pub fn check_commit_count(&self, count: usize, report: &mut Report) {
        let max = self.rules.max_commits;
        if count > max {
            report.emit(
                Rule::TooManyCommits,
                None,
                format!(
                    "This pull request has {count} commits, more than {max}; consider \
                     squashing them with an interactive rebase"
                ),
            );
        }
    }

    fn line_too_long(&self, line: &str) -> bool {
        let max = self.rules.max_body_line_length;
        let line = line.trim();
        let len = line.chars().count();

        if len <= max {
            return false;
        }

        let url_len: usize = url_pattern()
            .find_iter(line)
            .map(|m| m.as_str().chars().count())
            .sum();

        len - url_len > max
    }

    fn is_large_change(&self, commit: &Commit) -> bool {
        commit.stats.files_changed > self.rules.large_diff_files
            && commit.stats.lines_changed >= self.rules.large_diff_lines
    }
}

/// Lints `commits` for `pr` with the given configuration.
pub fn run_lint(config: &Config, commits: &[Commit], pr: &PullRequest) -> LintOutcome {
    CommitLinter::new(config, pr).run(commits)
}

/// Guidance printed once when any commit fails.
fn summary_markdown(rules: &RulesConfig, docs_url: &str) -> String {
    let max_subject = rules.max_subject_length;
    let max_line = rules.max_body_line_length;
    let types = rules.types.join(", ");

    format!(
        "## Commit message guidelines\n\
         \n\
         Some commits in this pull request do not follow the commit message rules:\n\
         \n\
         1. The subject follows [conventional commits]({docs_url}): `type(scope): description`.\n\
         1. The type is one of: {types}.\n\
         1. The subject is at most {max_subject} characters and does not end with a period.\n\
         1. The subject and body are separated by a blank line.\n\
         1. Body lines are at most {max_line} characters; URLs do not count.\n\
         1. Large changes explain themselves in the body.\n\
         \n\
         Good:\n\
         \n\
         ```\n\
         feat(parser): support nested scopes\n\
         \n\
         Scopes may now contain other scopes. The lexer tracks depth so\n\
         closing parentheses are matched correctly.\n\
         ```\n\
         \n\
         Bad:\n\
         \n\
         ```\n\
         Fixed some stuff.\n\
         ```\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commit::DiffStats;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // =========================================================================
    // Helper functions for tests
    // =========================================================================

    fn commit(message: &str) -> Commit {
        Commit::new("0123456789abcdef", message, DiffStats::default())
    }

    fn commit_with_stats(message: &str, files: usize, lines: usize) -> Commit {
        Commit::new(
            "fedcba9876543210",
            message,
            DiffStats {
                files_changed: files,
                lines_changed: lines,
            },
        )
    }

    fn lint_with(pr: &PullRequest, commit: &Commit) -> (LintResult, Report) {
        let config = Config::default();
        let linter = CommitLinter::new(&config, pr);
        let mut report = Report::new();
        let result = linter.lint_commit(commit, &mut report);
        (result, report)
    }

    fn lint(commit: &Commit) -> (LintResult, Report) {
        lint_with(&PullRequest::default(), commit)
    }

    fn rules(report: &Report) -> Vec<Rule> {
        report.diagnostics.iter().map(|d| d.rule).collect()
    }

    fn pr(title: &str, squash: bool) -> PullRequest {
        PullRequest {
            title: title.to_string(),
            squash,
        }
    }

    // =========================================================================
    // Ignored prefixes
    // =========================================================================

    #[rstest]
    #[case("Merge branch 'main' into feature.")]
    #[case("Revert \"a very long and entirely non conventional subject line that goes on and on.\"")]
    #[case("chore: update snapshots\nno separator")]
    fn test_ignored_prefix_skips_all_checks(#[case] message: &str) {
        let (result, report) = lint(&commit_with_stats(message, 50, 5000));
        assert!(!result.failed);
        assert!(result.messages.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    // =========================================================================
    // Subject rules
    // =========================================================================

    #[test]
    fn test_clean_commit_passes() {
        let (result, report) = lint(&commit("feat(parser): add support for x\n\nDetails here."));
        assert!(!result.failed);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_subject_length_boundary() {
        let prefix = "fix: ";
        let ok = format!("{prefix}{}", "a".repeat(72 - prefix.len()));
        let too_long = format!("{prefix}{}", "a".repeat(73 - prefix.len()));
        assert_eq!(ok.len(), 72);

        let (result, _) = lint(&commit(&ok));
        assert!(!result.failed);

        let (result, report) = lint(&commit(&too_long));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::SubjectLength]);
    }

    #[test]
    fn test_subject_length_counts_characters() {
        let subject = format!("docs: {}", "é".repeat(66));
        assert_eq!(subject.chars().count(), 72);
        let (result, _) = lint(&commit(&subject));
        assert!(!result.failed);
    }

    #[test]
    fn test_suggestion_requires_squash() {
        let message = "Apply suggestion to src/main.rs";

        let (result, report) = lint_with(&pr("fix: x", false), &commit(message));
        assert!(result.failed);
        assert_eq!(
            rules(&report),
            vec![Rule::SquashSuggestion, Rule::ConventionalFormat]
        );

        let (_, report) = lint_with(&pr("fix: x", true), &commit(message));
        assert_eq!(rules(&report), vec![Rule::ConventionalFormat]);
    }

    #[test]
    fn test_trailing_period() {
        let (result, report) = lint(&commit("fix: handle empty input."));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::TrailingPeriod]);
        assert_eq!(
            result.messages,
            vec!["The commit subject must not end with a period".to_string()]
        );
    }

    #[test]
    fn test_missing_separator() {
        let (result, report) = lint(&commit("fix: handle empty input\nbody without blank line"));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::Separator]);
    }

    // =========================================================================
    // Body rules
    // =========================================================================

    #[test]
    fn test_body_line_length_boundary() {
        let (result, _) = lint(&commit(&format!("fix: x\n\n{}", "a".repeat(144))));
        assert!(!result.failed);

        let (result, report) = lint(&commit(&format!("fix: x\n\n{}", "a".repeat(145))));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::BodyLineLength]);
    }

    #[test]
    fn test_body_line_is_trimmed() {
        let line = format!("    {}    ", "a".repeat(144));
        let (result, _) = lint(&commit(&format!("fix: x\n\n{line}")));
        assert!(!result.failed);
    }

    #[test]
    fn test_body_line_urls_are_discounted() {
        let url = "https://example.com/x";
        let url = &url[..20];
        assert_eq!(url.len(), 20);
        let line = format!("{} {url}", "a".repeat(129));
        assert_eq!(line.len(), 150);

        let (result, _) = lint(&commit(&format!("fix: x\n\n{line}")));
        assert!(!result.failed);
    }

    #[test]
    fn test_body_line_long_text_with_short_url_fails() {
        let line = format!("{} http://a.io", "a".repeat(150));
        let (result, report) = lint(&commit(&format!("fix: x\n\n{line}")));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::BodyLineLength]);
    }

    #[test]
    fn test_body_line_length_reported_per_line() {
        let long = "a".repeat(200);
        let (result, report) =
            lint(&commit(&format!("fix: x\n\n{long}\nshort\n{long}")));

        assert_eq!(
            rules(&report),
            vec![Rule::BodyLineLength, Rule::BodyLineLength]
        );
        assert_eq!(
            result.messages,
            vec![
                "Line 3 of the commit message is longer than 144 characters".to_string(),
                "Line 5 of the commit message is longer than 144 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_body_for_large_change() {
        let (result, report) = lint(&commit_with_stats("feat: big change", 11, 100));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::MissingBody]);
    }

    #[rstest]
    #[case(10, 100_000)]
    #[case(11, 99)]
    #[case(0, 0)]
    fn test_small_change_without_body_passes(#[case] files: usize, #[case] lines: usize) {
        let (result, _) = lint(&commit_with_stats("feat: change", files, lines));
        assert!(!result.failed);
    }

    #[test]
    fn test_large_change_with_body_passes() {
        let (result, _) = lint(&commit_with_stats(
            "feat: big change\n\nExplains why.",
            50,
            5000,
        ));
        assert!(!result.failed);
    }

    // =========================================================================
    // Conventional format
    // =========================================================================

    #[test]
    fn test_non_conventional_subject() {
        let (result, report) = lint(&commit("weird message"));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::ConventionalFormat]);
        assert!(result.messages[0].contains("does not comply with conventional commits"));
    }

    #[test]
    fn test_unknown_type() {
        let (result, report) = lint(&commit("bogus: did a thing"));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::KnownType]);
        assert!(result.messages[0].contains("not a well-known semantic commit type"));
    }

    #[test]
    fn test_empty_message_fails_conventional_check() {
        let (result, report) = lint(&commit(""));
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::ConventionalFormat]);
    }

    // =========================================================================
    // Ordering and tagging
    // =========================================================================

    #[test]
    fn test_diagnostic_order_is_deterministic() {
        let message = format!(
            "Apply suggestion to {}.\ntext\n{}",
            "x".repeat(80),
            "y".repeat(200)
        );
        let (result, report) = lint(&commit(&message));

        assert!(result.failed);
        assert_eq!(
            rules(&report),
            vec![
                Rule::SubjectLength,
                Rule::SquashSuggestion,
                Rule::TrailingPeriod,
                Rule::Separator,
                Rule::BodyLineLength,
                Rule::ConventionalFormat,
            ]
        );
        assert_eq!(result.messages.len(), 6);
    }

    #[test]
    fn test_diagnostics_are_tagged_with_short_id() {
        let (_, report) = lint(&commit("weird message"));
        assert_eq!(report.diagnostics[0].commit.as_deref(), Some("01234567"));
    }

    // =========================================================================
    // Pull request checks
    // =========================================================================

    #[test]
    fn test_wip_title_is_stripped() {
        let config = Config::default();
        let pr = pr("WIP: fix: bug", true);
        let mut report = Report::new();
        CommitLinter::new(&config, &pr).lint_pr(&mut report);
        assert!(report.diagnostics.is_empty());
    }

    #[rstest]
    #[case("weird title")]
    #[case("bogus: title")]
    #[case("WIP: weird title")]
    fn test_bad_title_warns_when_squashing(#[case] title: &str) {
        let config = Config::default();
        let pr = pr(title, true);
        let mut report = Report::new();
        CommitLinter::new(&config, &pr).lint_pr(&mut report);

        assert_eq!(rules(&report), vec![Rule::PrTitle]);
        assert!(!report.failed());
    }

    #[test]
    fn test_title_ignored_without_squash() {
        let config = Config::default();
        let pr = pr("weird title", false);
        let mut report = Report::new();
        CommitLinter::new(&config, &pr).lint_pr(&mut report);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_rebase_warning_above_ten_commits() {
        let config = Config::default();
        let commits: Vec<_> = (0..11).map(|_| commit("fix: small")).collect();

        let outcome = run_lint(&config, &commits, &PullRequest::default());
        assert!(outcome.success());
        assert_eq!(rules(&outcome.report), vec![Rule::TooManyCommits]);

        let outcome = run_lint(&config, &commits[..10], &PullRequest::default());
        assert!(outcome.report.diagnostics.is_empty());
    }

    #[test]
    fn test_rebase_warning_independent_of_failures() {
        let config = Config::default();
        let commits: Vec<_> = (0..12).map(|_| commit("weird message")).collect();

        let outcome = run_lint(&config, &commits, &PullRequest::default());
        assert!(!outcome.success());
        assert_eq!(outcome.failed_count(), 12);
        assert!(outcome.report.warnings().any(|d| d.rule == Rule::TooManyCommits));
    }

    // =========================================================================
    // Aggregate run
    // =========================================================================

    #[test]
    fn test_summary_only_when_a_commit_fails() {
        let config = Config::default();

        let outcome = run_lint(&config, &[commit("fix: fine")], &PullRequest::default());
        assert!(outcome.report.summary.is_none());

        let outcome = run_lint(
            &config,
            &[commit("fix: fine"), commit("weird message")],
            &PullRequest::default(),
        );
        let summary = outcome.report.summary.as_deref().expect("summary");
        assert!(summary.contains("conventionalcommits.org"));
        assert!(summary.contains("72 characters"));
        assert_eq!(outcome.failed_count(), 1);
    }

    #[test]
    fn test_run_keeps_input_order() {
        let config = Config::default();
        let commits = vec![
            Commit::new("aaa", "fix: one", DiffStats::default()),
            Commit::new("bbb", "nope", DiffStats::default()),
        ];
        let outcome = run_lint(&config, &commits, &PullRequest::default());

        let ids: Vec<_> = outcome.commits.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["aaa", "bbb"]);
        assert!(!outcome.commits[0].1.failed);
        assert!(outcome.commits[1].1.failed);
    }

    #[test]
    fn test_title_warning_does_not_fail_run() {
        let config = Config::default();
        let outcome = run_lint(&config, &[commit("fix: fine")], &pr("nope", true));
        assert!(outcome.success());
        assert_eq!(outcome.report.warnings().count(), 1);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut config = Config::default();
        config.rules.max_subject_length = 10;
        config.rules.types = vec!["wip".to_string()];
        let pr = PullRequest::default();
        let linter = CommitLinter::new(&config, &pr);
        let mut report = Report::new();

        let result = linter.lint_commit(&commit("wip: a thing"), &mut report);
        assert!(result.failed);
        assert_eq!(rules(&report), vec![Rule::SubjectLength]);
    }
}
