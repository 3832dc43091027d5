//! Key-level comparison of two parsed environments.

use std::path::PathBuf;

use serde::Serialize;

use crate::model::{EnvMap, Entry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Present on the left only.
    MissingInRight,
    /// Present on the right only.
    MissingInLeft,
    /// Present on both sides with different values.
    ValueMismatch,
}

/// A value and where it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Located {
    pub value: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl From<&Entry> for Located {
    fn from(entry: &Entry) -> Self {
        Self {
            value: entry.value.clone(),
            line: entry.line,
            source: entry.source.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diff {
    pub kind: DiffKind,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Located>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Located>,
}

/// Compare two environments.
///
/// Left keys come first in left order, followed by right-only keys in right
/// order. Keys with identical values produce nothing.
pub fn compare(left: &EnvMap, right: &EnvMap) -> Vec<Diff> {
    let mut diffs = Vec::new();

    for entry in left {
        match right.get(&entry.key) {
            None => diffs.push(Diff {
                kind: DiffKind::MissingInRight,
                key: entry.key.clone(),
                left: Some(entry.into()),
                right: None,
            }),
            Some(other) if other.value != entry.value => diffs.push(Diff {
                kind: DiffKind::ValueMismatch,
                key: entry.key.clone(),
                left: Some(entry.into()),
                right: Some(other.into()),
            }),
            Some(_) => {}
        }
    }

    diffs.extend(
        right
            .iter()
            .filter(|entry| !left.contains_key(&entry.key))
            .map(|entry| Diff {
                kind: DiffKind::MissingInLeft,
                key: entry.key.clone(),
                left: None,
                right: Some(entry.into()),
            }),
    );

    tracing::debug!(
        left = left.len(),
        right = right.len(),
        differences = diffs.len(),
        "compared environments"
    );
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mode;
    use crate::parser::{parse_str, parse_str_with_source};
    use std::path::Path;

    #[test]
    fn identical_environments_have_no_differences() {
        let left = parse_str("A=1\nB=2\n").env;
        let right = parse_str("B=2\n# reordered\nA=1\n").env;

        assert!(compare(&left, &right).is_empty());
    }

    #[test]
    fn reports_missing_and_mismatched_keys_in_order() {
        let left = parse_str("ONLY_LEFT=x\nSHARED=1\nSAME=s\n").env;
        let right = parse_str("SAME=s\nSHARED=2\nONLY_RIGHT=y\n").env;

        let diffs = compare(&left, &right);
        let summary: Vec<_> = diffs
            .iter()
            .map(|diff| (diff.kind, diff.key.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (DiffKind::MissingInRight, "ONLY_LEFT"),
                (DiffKind::ValueMismatch, "SHARED"),
                (DiffKind::MissingInLeft, "ONLY_RIGHT"),
            ]
        );

        let mismatch = &diffs[1];
        assert_eq!(
            mismatch.left,
            Some(Located {
                value: "1".to_owned(),
                line: 2,
                source: None,
            })
        );
        assert_eq!(
            mismatch.right,
            Some(Located {
                value: "2".to_owned(),
                line: 2,
                source: None,
            })
        );
    }

    #[test]
    fn empty_values_still_count_as_present() {
        let left = parse_str("EMPTY=\n").env;
        let right = parse_str("OTHER=1\n").env;

        let diffs = compare(&left, &right);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind, DiffKind::MissingInRight);
        assert_eq!(diffs[0].left.as_ref().map(|l| l.value.as_str()), Some(""));
    }

    #[test]
    fn located_values_carry_their_source_file() {
        let left = parse_str_with_source("A=1\n", Some(Path::new("base.env")), Mode::Lenient);
        let right = parse_str_with_source("\nA=2\n", Some(Path::new("prod.env")), Mode::Lenient);

        let diffs = compare(&left.env, &right.env);
        assert_eq!(diffs.len(), 1);
        let left_side = diffs[0].left.as_ref().expect("left side");
        let right_side = diffs[0].right.as_ref().expect("right side");
        assert_eq!(left_side.source.as_deref(), Some(Path::new("base.env")));
        assert_eq!(right_side.source.as_deref(), Some(Path::new("prod.env")));
        assert_eq!(right_side.line, 2);

        let json = serde_json::to_value(&diffs).expect("serialize");
        assert_eq!(json[0]["right"]["source"], "prod.env");
    }
}
