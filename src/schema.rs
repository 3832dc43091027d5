//! Type-guessed schema derived from a parsed environment.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::model::EnvMap;
use crate::secrets::is_redacted;

/// Placeholder written instead of a sensitive example value.
pub const MASK: &str = "********";

/// Guessed type of an example value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    String,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
        }
    }
}

pub fn guess_value_type(value: &str) -> ValueType {
    let value = value.trim();
    if value == "true" || value == "false" {
        return ValueType::Boolean;
    }
    if value.parse::<i64>().is_ok() {
        return ValueType::Integer;
    }
    if value.parse::<f64>().is_ok() {
        return ValueType::Float;
    }
    ValueType::String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaItem {
    pub example: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub required: bool,
    pub sensitive: bool,
}

/// One [`SchemaItem`] per key, in the environment's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    items: Vec<(String, SchemaItem)>,
}

impl Schema {
    /// Build a schema from `env`.
    ///
    /// Sensitive examples are replaced with [`MASK`] unless `unmask` is set.
    pub fn generate(env: &EnvMap, unmask: bool) -> Self {
        let items = env
            .iter()
            .map(|entry| {
                let sensitive = is_redacted(&entry.key, &entry.value);
                let example = if sensitive && !unmask {
                    MASK.to_owned()
                } else {
                    entry.value.clone()
                };
                let item = SchemaItem {
                    example,
                    value_type: guess_value_type(&entry.value),
                    required: false,
                    sensitive,
                };
                (entry.key.clone(), item)
            })
            .collect();

        Self { items }
    }

    pub fn get(&self, key: &str) -> Option<&SchemaItem> {
        self.items
            .iter()
            .find(|(item_key, _)| item_key == key)
            .map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaItem)> {
        self.items.iter().map(|(key, item)| (key.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, item) in &self.items {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn guesses_value_types() {
        assert_eq!(guess_value_type("true"), ValueType::Boolean);
        assert_eq!(guess_value_type("false"), ValueType::Boolean);
        assert_eq!(guess_value_type("TRUE"), ValueType::String);
        assert_eq!(guess_value_type("8080"), ValueType::Integer);
        assert_eq!(guess_value_type("-42"), ValueType::Integer);
        assert_eq!(guess_value_type("3.14"), ValueType::Float);
        assert_eq!(guess_value_type("1e6"), ValueType::Float);
        assert_eq!(guess_value_type("localhost"), ValueType::String);
        assert_eq!(guess_value_type(""), ValueType::String);
    }

    #[test]
    fn generates_items_in_key_order() {
        let report = parse_str("PORT=8080\nDEBUG=true\nRATIO=0.5\nNAME=app\n");
        let schema = Schema::generate(&report.env, false);

        let keys: Vec<_> = schema.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["PORT", "DEBUG", "RATIO", "NAME"]);

        let port = schema.get("PORT").expect("PORT");
        assert_eq!(port.value_type, ValueType::Integer);
        assert_eq!(port.example, "8080");
        assert!(!port.required);
        assert!(!port.sensitive);
    }

    #[test]
    fn masks_sensitive_examples_unless_unmasked() {
        let report = parse_str("DB_PASSWORD=hunter2\n");

        let masked = Schema::generate(&report.env, false);
        let item = masked.get("DB_PASSWORD").expect("DB_PASSWORD");
        assert!(item.sensitive);
        assert_eq!(item.example, MASK);

        let unmasked = Schema::generate(&report.env, true);
        let item = unmasked.get("DB_PASSWORD").expect("DB_PASSWORD");
        assert!(item.sensitive);
        assert_eq!(item.example, "hunter2");
    }

    #[test]
    fn type_is_guessed_from_real_value_when_masked() {
        let report = parse_str("AUTH_PIN=1234\n");
        let schema = Schema::generate(&report.env, false);

        let item = schema.get("AUTH_PIN").expect("AUTH_PIN");
        assert_eq!(item.example, MASK);
        assert_eq!(item.value_type, ValueType::Integer);
    }
}
