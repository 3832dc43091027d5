//! JSON, YAML and plain-text output for schemas, diffs and issue lists.

use std::fmt;
use std::str::FromStr;

use crate::diff::{Diff, DiffKind};
use crate::error::Error;
use crate::issue::Issue;
use crate::model::ParseReport;
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Text,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(Error::UnknownFormat(value.to_owned())),
        }
    }
}

pub fn render_schema(schema: &Schema, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(schema)?),
        OutputFormat::Text => Ok(SchemaText(schema).to_string()),
    }
}

/// Render `diffs` between the files labelled `left` and `right`.
pub fn render_diff(
    diffs: &[Diff],
    left: &str,
    right: &str,
    format: OutputFormat,
) -> Result<String, Error> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diffs)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(diffs)?),
        OutputFormat::Text => Ok(DiffText { diffs, left, right }.to_string()),
    }
}

/// Human-readable listing of a report's errors and warnings.
///
/// Empty when the report is clean.
pub fn render_issues(report: &ParseReport) -> String {
    IssueListing(report).to_string()
}

struct SchemaText<'a>(&'a Schema);

impl fmt::Display for SchemaText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, item) in self.0.iter() {
            writeln!(f, "{key}:")?;
            writeln!(f, "  example: {}", item.example)?;
            writeln!(f, "  type: {}", item.value_type)?;
            writeln!(f, "  required: {}", item.required)?;
            writeln!(f, "  sensitive: {}", item.sensitive)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

struct DiffText<'a> {
    diffs: &'a [Diff],
    left: &'a str,
    right: &'a str,
}

impl fmt::Display for DiffText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { diffs, left, right } = self;
        if diffs.is_empty() {
            return writeln!(f, "✓ Files are identical");
        }

        writeln!(f, "=== Comparison: {left} vs {right} ===")?;
        for diff in diffs.iter() {
            match diff.kind {
                DiffKind::MissingInRight => {
                    writeln!(f, "  - {:<20} (only in {left})", diff.key)?;
                }
                DiffKind::MissingInLeft => {
                    writeln!(f, "  + {:<20} (only in {right})", diff.key)?;
                }
                DiffKind::ValueMismatch => {
                    let left_value = diff.left.as_ref().map_or("", |loc| loc.value.as_str());
                    let right_value = diff.right.as_ref().map_or("", |loc| loc.value.as_str());
                    writeln!(
                        f,
                        "  ~ {:<20} {left_value:?} → {right_value:?}",
                        diff.key
                    )?;
                }
            }
        }
        writeln!(f, "\n{} difference(s) found", diffs.len())
    }
}

struct IssueListing<'a>(&'a ParseReport);

impl fmt::Display for IssueListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_issue_block(f, "Errors", &report.errors)?;
        if !report.errors.is_empty() && !report.warnings.is_empty() {
            writeln!(f)?;
        }
        write_issue_block(f, "Warnings", &report.warnings)
    }
}

fn write_issue_block(f: &mut fmt::Formatter<'_>, title: &str, issues: &[Issue]) -> fmt::Result {
    if issues.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title}: {} found", issues.len())?;
    for issue in issues {
        writeln!(f, "  {issue}")?;
    }
    Ok(())
}
