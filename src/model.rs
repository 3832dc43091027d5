use std::collections::HashMap;
use std::path::PathBuf;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::issue::Issue;

/// An accepted `KEY=VALUE` entry from a `.env` file or input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// File the entry was read from; `None` for in-memory input.
    pub source: Option<PathBuf>,
    pub line: u32,
}

/// Parsing behavior for one parse invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Report questionable lines as warnings and accept any key text.
    #[default]
    Lenient,
    /// Escalate warnings to errors and require `[A-Z_][A-Z0-9_]*` keys.
    Strict,
}

impl Mode {
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

impl From<bool> for Mode {
    fn from(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// Key to entry mapping where the first occurrence of a key wins.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<Entry>,
    by_key: HashMap<String, usize>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` unless its key is already present.
    ///
    /// On conflict the stored entry is left untouched and returned.
    pub fn insert_first(&mut self, entry: Entry) -> Result<(), &Entry> {
        if let Some(existing_idx) = self.by_key.get(&entry.key).copied() {
            return Err(&self.entries[existing_idx]);
        }

        self.by_key.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.by_key.get(key).map(|idx| &self.entries[*idx])
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|entry| entry.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

impl<'a> IntoIterator for &'a EnvMap {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for EnvMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// Everything one parse call produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub env: EnvMap,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ParseReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
