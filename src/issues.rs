//! Issue types for client library analysis results.
//!
//! Each issue is self-contained: the reporter needs nothing beyond the
//! issue itself to print it.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DuplicateCategory,
    CircularDependency,
    UnusedCategory,
    MissingCategory,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DuplicateCategory => write!(f, "duplicate-category"),
            Rule::CircularDependency => write!(f, "circular-dependency"),
            Rule::UnusedCategory => write!(f, "unused-category"),
            Rule::MissingCategory => write!(f, "missing-category"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Category declared at two or more locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCategoryIssue {
    pub category: String,
    /// Declaring paths in discovery order; at least two.
    pub paths: Vec<String>,
}

impl DuplicateCategoryIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateCategory
    }
}

/// Closed chain of embed/dependency edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependencyIssue {
    /// `[c0, c1, ..., c0]`
    pub cycle: Vec<String>,
}

impl CircularDependencyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::CircularDependency
    }

    /// Distinct categories in the cycle.
    pub fn len(&self) -> usize {
        self.cycle.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declared category that is never referenced, embedded or depended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedCategoryIssue {
    pub category: String,
    /// Where the category is declared.
    pub source_path: String,
}

impl UnusedCategoryIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedCategory
    }
}

/// Page component with no matching declared category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCategoryIssue {
    /// Component resource type as listed in the page snapshot.
    pub component: String,
    /// Content path of the analyzed page.
    pub page_path: String,
}

impl MissingCategoryIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingCategory
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DuplicateCategory(DuplicateCategoryIssue),
    CircularDependency(CircularDependencyIssue),
    UnusedCategory(UnusedCategoryIssue),
    MissingCategory(MissingCategoryIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::DuplicateCategory(_) => DuplicateCategoryIssue::severity(),
            Issue::CircularDependency(_) => CircularDependencyIssue::severity(),
            Issue::UnusedCategory(_) => UnusedCategoryIssue::severity(),
            Issue::MissingCategory(_) => MissingCategoryIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::DuplicateCategory(_) => DuplicateCategoryIssue::rule(),
            Issue::CircularDependency(_) => CircularDependencyIssue::rule(),
            Issue::UnusedCategory(_) => UnusedCategoryIssue::rule(),
            Issue::MissingCategory(_) => MissingCategoryIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A repository path (declaration folder, config file, unparsable file).
    File { path: &'a str },
    /// A content path from a page snapshot.
    Page { path: &'a str },
    /// Graph-wide; no single location.
    Graph,
}

impl ReportLocation<'_> {
    pub fn path(&self) -> Option<&str> {
        match self {
            ReportLocation::File { path } | ReportLocation::Page { path } => Some(path),
            ReportLocation::Graph => None,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (category, cycle, error text).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for DuplicateCategoryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: self.paths.first().map(String::as_str).unwrap_or_default(),
        }
    }

    fn message(&self) -> String {
        self.category.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let others = self.paths.get(1..).unwrap_or_default();
        Some(format!("also declared in: {}", others.join(", ")))
    }
}

impl Report for CircularDependencyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Graph
    }

    fn message(&self) -> String {
        self.cycle.join(" → ")
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        match self.len() {
            1 => Some(format!("{} embeds or depends on itself", self.cycle[0])),
            2 => Some(format!(
                "{} and {} require each other",
                self.cycle[0], self.cycle[1]
            )),
            n => Some(format!("{} categories form a loop", n)),
        }
    }

    fn hint(&self) -> Option<&str> {
        Some("remove one embed/dependency edge to break the cycle")
    }
}

impl Report for UnusedCategoryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.source_path,
        }
    }

    fn message(&self) -> String {
        self.category.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("not referenced by any template, policy or script, and not embedded".to_string())
    }
}

impl Report for MissingCategoryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Page {
            path: &self.page_path,
        }
    }

    fn message(&self) -> String {
        self.component.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("no declared category matches this component".to_string())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Sort by: path (graph-wide last), rule, message
        let (a, b) = (self.location(), other.location());
        match (a.path(), b.path()) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then_with(|| self.rule().cmp(&other.rule()))
                .then_with(|| self.message().cmp(&other.message())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .rule()
                .cmp(&other.rule())
                .then_with(|| self.message().cmp(&other.message())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
