//! Conventional-commit subject parsing.

use regex::Regex;
use std::sync::OnceLock;

static SEMANTIC_PATTERN: OnceLock<Regex> = OnceLock::new();
static WIP_PATTERN: OnceLock<Regex> = OnceLock::new();

fn semantic_pattern() -> &'static Regex {
    SEMANTIC_PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^()]+)\))?(?P<breaking>!)?: (?P<description>.+)$")
            .expect("semantic commit pattern is valid")
    })
}

fn wip_pattern() -> &'static Regex {
    WIP_PATTERN.get_or_init(|| {
        Regex::new(r"^(WIP: +)?(.*)").expect("WIP pattern is valid")
    })
}

/// Parsed view of a subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticMatch<'a> {
    /// The subject follows `type(scope)!: description`.
    Matched {
        /// Commit type, e.g. `feat`.
        kind: &'a str,
        /// Optional scope between parentheses.
        scope: Option<&'a str>,
        /// Whether the `!` breaking-change marker is present.
        breaking: bool,
        /// Text after `: `.
        description: &'a str,
    },
    /// The subject does not follow the format.
    Unmatched,
}

impl<'a> SemanticMatch<'a> {
    /// Returns the commit type when matched.
    #[must_use]
    pub const fn kind(&self) -> Option<&'a str> {
        match self {
            Self::Matched { kind, .. } => Some(*kind),
            Self::Unmatched => None,
        }
    }
}

/// Parses a subject line against the conventional-commit format.
#[must_use]
pub fn parse(subject: &str) -> SemanticMatch<'_> {
    let Some(caps) = semantic_pattern().captures(subject) else {
        return SemanticMatch::Unmatched;
    };

    match (caps.name("type"), caps.name("description")) {
        (Some(kind), Some(description)) => SemanticMatch::Matched {
            kind: kind.as_str(),
            scope: caps.name("scope").map(|m| m.as_str()),
            breaking: caps.name("breaking").is_some(),
            description: description.as_str(),
        },
        _ => SemanticMatch::Unmatched,
    }
}

/// Strips a leading `WIP: ` marker from a pull request title.
#[must_use]
pub fn strip_wip(title: &str) -> &str {
    wip_pattern()
        .captures(title)
        .and_then(|caps| caps.get(2))
        .map_or(title, |m| m.as_str())
}
