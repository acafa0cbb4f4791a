//! The persisted value model.
//!
//! A store holds exactly one [`StoredValue`] per key. The variant written is
//! the variant that must be read back; typed reads of another variant fail
//! with [`StoreError::TypeMismatch`](crate::StoreError::TypeMismatch).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed value as persisted in a preference store.
///
/// Serialized adjacently tagged so scope files stay readable:
/// `{"type": "int", "value": 3}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    Bool(bool),
    Float(f32),
    Int(i32),
    Long(i64),
    String(String),
    StringSet(BTreeSet<String>),
}

impl StoredValue {
    /// The type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            StoredValue::Bool(_) => ValueKind::Bool,
            StoredValue::Float(_) => ValueKind::Float,
            StoredValue::Int(_) => ValueKind::Int,
            StoredValue::Long(_) => ValueKind::Long,
            StoredValue::String(_) => ValueKind::String,
            StoredValue::StringSet(_) => ValueKind::StringSet,
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Bool(v) => write!(f, "{v}"),
            StoredValue::Float(v) => write!(f, "{v}"),
            StoredValue::Int(v) => write!(f, "{v}"),
            StoredValue::Long(v) => write!(f, "{v}"),
            StoredValue::String(v) => f.write_str(v),
            StoredValue::StringSet(set) => {
                f.write_str("{")?;
                for (i, item) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// The type tag of a [`StoredValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Float,
    Int,
    Long,
    String,
    StringSet,
}

impl ValueKind {
    /// Lowercase name used in scope files and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::String => "string",
            ValueKind::StringSet => "string_set",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(StoredValue::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(StoredValue::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(StoredValue::Int(3).kind(), ValueKind::Int);
        assert_eq!(StoredValue::Long(3).kind(), ValueKind::Long);
        assert_eq!(StoredValue::String("x".into()).kind(), ValueKind::String);
        assert_eq!(
            StoredValue::StringSet(BTreeSet::new()).kind(),
            ValueKind::StringSet
        );
    }

    #[test]
    fn serialized_form_is_adjacently_tagged() {
        let json = serde_json::to_string(&StoredValue::Int(7)).unwrap();
        assert_eq!(json, r#"{"type":"int","value":7}"#);

        let set: BTreeSet<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        let json = serde_json::to_string(&StoredValue::StringSet(set)).unwrap();
        assert_eq!(json, r#"{"type":"string_set","value":["a","b"]}"#);
    }

    #[test]
    fn long_and_int_stay_distinct_after_decode() {
        let decoded: StoredValue =
            serde_json::from_str(r#"{"type":"long","value":7}"#).unwrap();
        assert_eq!(decoded, StoredValue::Long(7));
    }

    #[test]
    fn display_string_set() {
        let set: BTreeSet<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(StoredValue::StringSet(set).to_string(), r#"{"a", "b"}"#);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::StringSet.to_string(), "string_set");
        assert_eq!(ValueKind::Long.to_string(), "long");
    }
}
