//! Preference values as seen by callers.
//!
//! [`PrefValue`] is the closed set of shapes a preference can take: the six
//! primitives a store persists natively, plus [`PrefValue::Object`] for
//! anything else, which travels through the store as JSON text.
//!
//! [`PrefType`] maps plain Rust types onto the primitive variants so callers
//! can write `prefs.get_as("count", 0)` instead of matching on `PrefValue`.

use std::collections::BTreeSet;
use std::fmt;

use prefkit_store::{PreferenceStore, StoreResult, StoredValue, ValueKind};

/// A preference value.
#[derive(Clone, Debug, PartialEq)]
pub enum PrefValue {
    Bool(bool),
    Float(f32),
    Int(i32),
    Long(i64),
    String(String),
    StringSet(BTreeSet<String>),
    /// Any JSON-representable value, persisted as a string entry.
    Object(serde_json::Value),
}

impl PrefValue {
    /// Short name of the variant, e.g. `"long"` or `"object"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PrefValue::Object(_) => "object",
            PrefValue::Bool(_) => ValueKind::Bool.as_str(),
            PrefValue::Float(_) => ValueKind::Float.as_str(),
            PrefValue::Int(_) => ValueKind::Int.as_str(),
            PrefValue::Long(_) => ValueKind::Long.as_str(),
            PrefValue::String(_) => ValueKind::String.as_str(),
            PrefValue::StringSet(_) => ValueKind::StringSet.as_str(),
        }
    }
}

impl From<StoredValue> for PrefValue {
    fn from(value: StoredValue) -> Self {
        match value {
            StoredValue::Bool(v) => PrefValue::Bool(v),
            StoredValue::Float(v) => PrefValue::Float(v),
            StoredValue::Int(v) => PrefValue::Int(v),
            StoredValue::Long(v) => PrefValue::Long(v),
            StoredValue::String(v) => PrefValue::String(v),
            StoredValue::StringSet(v) => PrefValue::StringSet(v),
        }
    }
}

impl From<serde_json::Value> for PrefValue {
    fn from(value: serde_json::Value) -> Self {
        PrefValue::Object(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::String(value.to_string())
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(v) => write!(f, "{v}"),
            PrefValue::Float(v) => write!(f, "{v}"),
            PrefValue::Int(v) => write!(f, "{v}"),
            PrefValue::Long(v) => write!(f, "{v}"),
            PrefValue::String(v) => f.write_str(v),
            PrefValue::StringSet(v) => write!(f, "{}", StoredValue::StringSet(v.clone())),
            PrefValue::Object(v) => write!(f, "{v}"),
        }
    }
}

/// A Rust type persisted natively by a preference store.
pub trait PrefType: Sized {
    /// The store type tag this Rust type maps to.
    const KIND: ValueKind;

    /// Typed read of `key` from `store`, falling back to `default`.
    fn read(store: &dyn PreferenceStore, key: &str, default: Self) -> StoreResult<Self>;

    fn into_stored(self) -> StoredValue;

    fn into_pref(self) -> PrefValue {
        PrefValue::from(self.into_stored())
    }
}

macro_rules! impl_pref_type {
    ($ty:ty, $kind:ident, $getter:ident) => {
        impl PrefType for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn read(store: &dyn PreferenceStore, key: &str, default: Self) -> StoreResult<Self> {
                store.$getter(key, default)
            }

            fn into_stored(self) -> StoredValue {
                StoredValue::$kind(self)
            }
        }

        impl From<$ty> for PrefValue {
            fn from(value: $ty) -> Self {
                PrefValue::$kind(value)
            }
        }
    };
}

impl_pref_type!(bool, Bool, get_bool);
impl_pref_type!(f32, Float, get_float);
impl_pref_type!(i32, Int, get_int);
impl_pref_type!(i64, Long, get_long);
impl_pref_type!(String, String, get_string);
impl_pref_type!(BTreeSet<String>, StringSet, get_string_set);
