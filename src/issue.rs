use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::model::Mode;

/// Category of a recorded finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Structurally malformed line.
    Syntax,
    /// Key seen more than once.
    Duplicate,
    /// Rule violated because strict mode is active.
    Strict,
    /// Non-fatal finding in lenient mode.
    Warning,
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Duplicate => write!(f, "duplicate"),
            Self::Strict => write!(f, "strict"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Which list an issue is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A condition detected while parsing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    MissingEquals,
    MissingKey,
    MissingValue,
    DanglingEscape,
    UnclosedQuote,
    ContentAfterQuote,
    InvalidStrictKey,
    /// Carries the line of the occurrence that was kept.
    DuplicateKey { first_line: u32 },
}

impl Condition {
    fn message(self) -> String {
        match self {
            Self::MissingEquals => "missing '='".to_owned(),
            Self::MissingKey => "missing key".to_owned(),
            Self::MissingValue => "missing value".to_owned(),
            Self::DanglingEscape => "dangling escape at end of value".to_owned(),
            Self::UnclosedQuote => "unclosed quoted value".to_owned(),
            Self::ContentAfterQuote => "content after closing quote".to_owned(),
            Self::InvalidStrictKey => {
                "invalid strict key (must be uppercase with underscores)".to_owned()
            }
            Self::DuplicateKey { first_line } => {
                format!("duplicate key detected; first occurrence on line {first_line}")
            }
        }
    }
}

/// Decide kind and severity of `condition` under `mode`.
pub fn classify(condition: Condition, mode: Mode) -> (IssueKind, Severity) {
    let strict = mode.is_strict();
    match condition {
        Condition::MissingEquals | Condition::MissingKey => (IssueKind::Syntax, Severity::Error),
        Condition::InvalidStrictKey => (IssueKind::Strict, Severity::Error),
        Condition::DuplicateKey { .. } if strict => (IssueKind::Duplicate, Severity::Error),
        Condition::DuplicateKey { .. } => (IssueKind::Duplicate, Severity::Warning),
        Condition::MissingValue
        | Condition::DanglingEscape
        | Condition::UnclosedQuote
        | Condition::ContentAfterQuote => {
            if strict {
                (IssueKind::Strict, Severity::Error)
            } else {
                (IssueKind::Warning, Severity::Warning)
            }
        }
    }
}

/// A structured finding tied to a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub line: u32,
    pub kind: IssueKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} [{}]: {}", self.line, self.kind, self.message)?;
        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }
        Ok(())
    }
}

/// Per-call accumulator for errors and warnings.
#[derive(Debug)]
pub(crate) struct IssueSink {
    mode: Mode,
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl IssueSink {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn record(&mut self, line: u32, key: Option<&str>, condition: Condition) {
        let (kind, severity) = classify(condition, self.mode);
        let issue = Issue {
            line,
            kind,
            message: condition.message(),
            key: key.map(str::to_owned),
        };
        tracing::trace!(line, ?kind, ?severity, message = %issue.message, "recorded issue");

        match severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub(crate) fn finish(self) -> (Vec<Issue>, Vec<Issue>) {
        (self.errors, self.warnings)
    }
}
