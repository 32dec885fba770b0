//! Built-in lint rules.
//!
//! Every diagnostic the linter emits is tagged with one of these rules so
//! reports can be filtered and rendered consistently.

use crate::core::report::Severity;
use serde::Serialize;

/// Names of built-in rules.
pub mod names {
    /// Subject line is too long.
    pub const SUBJECT_LENGTH: &str = "subject-length";
    /// "Apply suggestion to" commit in a pull request that is not squashed.
    pub const SQUASH_SUGGESTION: &str = "squash-suggestion";
    /// Subject line ends with a period.
    pub const TRAILING_PERIOD: &str = "trailing-period";
    /// Subject and body are not separated by a blank line.
    pub const SEPARATOR: &str = "separator";
    /// A body line is too long.
    pub const BODY_LINE_LENGTH: &str = "body-line-length";
    /// Large change without a body.
    pub const MISSING_BODY: &str = "missing-body";
    /// Subject does not follow `type(scope): description`.
    pub const CONVENTIONAL_FORMAT: &str = "conventional-format";
    /// Subject uses a type outside the configured vocabulary.
    pub const KNOWN_TYPE: &str = "known-type";
    /// Pull request title is not a valid conventional commit.
    pub const PR_TITLE: &str = "pr-title";
    /// Too many commits in the pull request.
    pub const TOO_MANY_COMMITS: &str = "too-many-commits";
}

/// A lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Rule {
    /// Subject line is longer than the configured limit.
    SubjectLength,
    /// Suggestion commits require squash merging.
    SquashSuggestion,
    /// Subject ends with `.`.
    TrailingPeriod,
    /// Text directly follows the subject line.
    Separator,
    /// Body line exceeds the limit after discounting URLs.
    BodyLineLength,
    /// Large multi-file change without a body.
    MissingBody,
    /// Subject is not a conventional commit.
    ConventionalFormat,
    /// Conventional commit with an unknown type.
    KnownType,
    /// Pull request title does not comply (squash merges only).
    PrTitle,
    /// Pull request has more commits than recommended.
    TooManyCommits,
}

impl Rule {
    /// All rules, in the order their diagnostics are emitted.
    pub const ALL: [Self; 10] = [
        Self::SubjectLength,
        Self::SquashSuggestion,
        Self::TrailingPeriod,
        Self::Separator,
        Self::BodyLineLength,
        Self::MissingBody,
        Self::ConventionalFormat,
        Self::KnownType,
        Self::PrTitle,
        Self::TooManyCommits,
    ];

    /// Returns the stable kebab-case name of the rule.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SubjectLength => names::SUBJECT_LENGTH,
            Self::SquashSuggestion => names::SQUASH_SUGGESTION,
            Self::TrailingPeriod => names::TRAILING_PERIOD,
            Self::Separator => names::SEPARATOR,
            Self::BodyLineLength => names::BODY_LINE_LENGTH,
            Self::MissingBody => names::MISSING_BODY,
            Self::ConventionalFormat => names::CONVENTIONAL_FORMAT,
            Self::KnownType => names::KNOWN_TYPE,
            Self::PrTitle => names::PR_TITLE,
            Self::TooManyCommits => names::TOO_MANY_COMMITS,
        }
    }

    /// Returns the severity a violation of this rule carries.
    ///
    /// Pull-request level rules are advisory; commit rules block the merge.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::PrTitle | Self::TooManyCommits => Severity::Warn,
            _ => Severity::Fail,
        }
    }
}

impl From<Rule> for &'static str {
    fn from(rule: Rule) -> Self {
        rule.name()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| format!("Unknown rule: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_names() {
        assert_eq!("subject-length".parse::<Rule>(), Ok(Rule::SubjectLength));
        assert_eq!("too-many-commits".parse::<Rule>(), Ok(Rule::TooManyCommits));
        assert!("custom-rule".parse::<Rule>().is_err());
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for rule in Rule::ALL {
            assert_eq!(rule.name().parse::<Rule>(), Ok(rule));
        }
    }

    #[test]
    fn test_pull_request_rules_only_warn() {
        assert_eq!(Rule::PrTitle.severity(), Severity::Warn);
        assert_eq!(Rule::TooManyCommits.severity(), Severity::Warn);
        assert_eq!(Rule::KnownType.severity(), Severity::Fail);
        assert_eq!(Rule::SubjectLength.severity(), Severity::Fail);
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Rule::MissingBody).expect("serialize");
        assert_eq!(json, "\"missing-body\"");
    }
}
