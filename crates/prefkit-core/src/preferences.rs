//! The typed preference accessor.
//!
//! [`Preferences`] wraps one [`PreferenceStore`] and dispatches every
//! operation on the variant of the [`PrefValue`] it is given. Primitive
//! variants map onto the store's typed entries; [`PrefValue::Object`] is
//! serialized to JSON text and kept in a string entry.
//!
//! Every `put` opens its own [`Editor`] and commits exactly one key.

use std::collections::BTreeSet;
use std::sync::Arc;

use prefkit_store::{
    Editor, InMemoryPreferenceStore, PreferenceStore, StoreError, StoredValue, ValueKind,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PrefsError, Result};
use crate::value::{PrefType, PrefValue};

/// Typed get/put access to one preference scope.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// An accessor over a fresh in-memory store named `scope`.
    pub fn in_memory(scope: impl Into<String>) -> Self {
        Self::new(Arc::new(InMemoryPreferenceStore::new(scope)))
    }

    /// Name of the scope the underlying store was opened for.
    pub fn scope_name(&self) -> &str {
        self.store.name()
    }

    /// Read `key`, using the variant of `default` to pick the entry type.
    ///
    /// A missing key yields `default` unchanged. A key written with a
    /// different type fails with a store `TypeMismatch`. For
    /// [`PrefValue::Object`] the stored text is parsed as JSON.
    pub fn get(&self, key: &str, default: PrefValue) -> Result<PrefValue> {
        let store = self.store.as_ref();
        let value = match default {
            PrefValue::Bool(d) => PrefValue::Bool(store.get_bool(key, d)?),
            PrefValue::Float(d) => PrefValue::Float(store.get_float(key, d)?),
            PrefValue::Int(d) => PrefValue::Int(store.get_int(key, d)?),
            PrefValue::Long(d) => PrefValue::Long(store.get_long(key, d)?),
            PrefValue::String(d) => PrefValue::String(store.get_string(key, d)?),
            PrefValue::StringSet(d) => PrefValue::StringSet(store.get_string_set(key, d)?),
            PrefValue::Object(d) => match self.read_json(key)? {
                None => PrefValue::Object(d),
                Some(text) => PrefValue::Object(parse(key, &text)?),
            },
        };
        Ok(value)
    }

    /// Write `value` under `key` and commit.
    pub fn put(&self, key: &str, value: PrefValue) -> Result<()> {
        let mut editor = Editor::new(self.store.as_ref());
        match value {
            PrefValue::Bool(v) => editor.put_bool(key, v)?,
            PrefValue::Float(v) => editor.put_float(key, v)?,
            PrefValue::Int(v) => editor.put_int(key, v)?,
            PrefValue::Long(v) => editor.put_long(key, v)?,
            PrefValue::String(v) => editor.put_string(key, v)?,
            PrefValue::StringSet(v) => editor.put_string_set(key, v)?,
            PrefValue::Object(v) => editor.put_string(key, render(key, &v)?)?,
        };
        editor.commit()?;
        Ok(())
    }

    /// Typed read of a primitive preference.
    pub fn get_as<T: PrefType>(&self, key: &str, default: T) -> Result<T> {
        Ok(T::read(self.store.as_ref(), key, default)?)
    }

    /// Typed write of a primitive preference.
    pub fn put_as<T: PrefType>(&self, key: &str, value: T) -> Result<()> {
        let mut editor = Editor::new(self.store.as_ref());
        editor.put(key, value.into_stored())?;
        editor.commit()?;
        Ok(())
    }

    /// Read a JSON-encoded object, or `default` if unset.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.read_json(key)? {
            None => Ok(default),
            Some(text) => parse(key, &text),
        }
    }

    /// Serialize `value` to JSON and store it under `key`.
    pub fn put_object<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let text = render(key, value)?;
        let mut editor = Editor::new(self.store.as_ref());
        editor.put_string(key, text)?;
        editor.commit()?;
        Ok(())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        self.get_as(key, default)
    }

    pub fn get_string(&self, key: &str, default: &str) -> Result<String> {
        self.get_as(key, default.to_string())
    }

    pub fn get_string_set(&self, key: &str, default: BTreeSet<String>) -> Result<BTreeSet<String>> {
        self.get_as(key, default)
    }

    /// Check whether `key` is set.
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.store.contains(key)?)
    }

    /// Remove `key`. Returns `true` if it was set.
    pub fn remove(&self, key: &str) -> Result<bool> {
        if !self.store.contains(key)? {
            return Ok(false);
        }
        let mut editor = Editor::new(self.store.as_ref());
        editor.remove(key)?;
        editor.commit()?;
        Ok(true)
    }

    /// Remove every key in this scope.
    pub fn clear(&self) -> Result<()> {
        let mut editor = Editor::new(self.store.as_ref());
        editor.clear();
        editor.commit()?;
        Ok(())
    }

    /// All keys set in this scope, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.store.keys()?)
    }

    /// Raw entry under `key`, without type dispatch.
    pub fn raw(&self, key: &str) -> Result<Option<StoredValue>> {
        Ok(self.store.read(key)?)
    }

    /// JSON text stored under `key`, if any.
    fn read_json(&self, key: &str) -> Result<Option<String>> {
        match self.store.read(key)? {
            None => Ok(None),
            Some(StoredValue::String(text)) => Ok(Some(text)),
            Some(other) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
                expected: ValueKind::String,
                found: other.kind(),
            }
            .into()),
        }
    }
}

fn parse<T: DeserializeOwned>(key: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| PrefsError::Deserialize {
        key: key.to_string(),
        source,
    })
}

fn render<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|source| PrefsError::Serialize {
        key: key.to_string(),
        source,
    })
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("scope", &self.scope_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u32,
        languages: Vec<String>,
    }

    // -----------------------------------------------------------------------
    // Primitive dispatch
    // -----------------------------------------------------------------------

    #[test]
    fn boolean_round_trip() {
        let prefs = Preferences::in_memory("user");
        prefs.put("flag", PrefValue::Bool(true)).unwrap();
        assert_eq!(prefs.get("flag", PrefValue::Bool(false)).unwrap(), PrefValue::Bool(true));
    }

    #[test]
    fn string_set_round_trip() {
        let prefs = Preferences::in_memory("user");
        prefs.put("tags", PrefValue::StringSet(set(&["a", "b"]))).unwrap();
        assert_eq!(
            prefs.get("tags", PrefValue::StringSet(BTreeSet::new())).unwrap(),
            PrefValue::StringSet(set(&["b", "a"]))
        );
    }

    #[test]
    fn every_primitive_branch_returns_the_stored_value() {
        let prefs = Preferences::in_memory("user");
        prefs.put("f", PrefValue::Float(2.5)).unwrap();
        prefs.put("i", PrefValue::Int(-12)).unwrap();
        prefs.put("l", PrefValue::Long(1 << 40)).unwrap();
        prefs.put("s", PrefValue::String("hello".into())).unwrap();

        assert_eq!(prefs.get("f", PrefValue::Float(0.0)).unwrap(), PrefValue::Float(2.5));
        assert_eq!(prefs.get("i", PrefValue::Int(0)).unwrap(), PrefValue::Int(-12));
        assert_eq!(prefs.get("l", PrefValue::Long(0)).unwrap(), PrefValue::Long(1 << 40));
        assert_eq!(
            prefs.get("s", PrefValue::String(String::new())).unwrap(),
            PrefValue::String("hello".into())
        );
    }

    #[test]
    fn unset_keys_return_defaults() {
        let prefs = Preferences::in_memory("user");
        let defaults = [
            PrefValue::Bool(true),
            PrefValue::Float(0.75),
            PrefValue::Int(9),
            PrefValue::Long(-9),
            PrefValue::String("d".into()),
            PrefValue::StringSet(set(&["x"])),
            PrefValue::Object(json!({"k": "v"})),
        ];
        for default in defaults {
            assert_eq!(prefs.get("missing", default.clone()).unwrap(), default);
        }
    }

    #[test]
    fn type_mismatch_propagates() {
        let prefs = Preferences::in_memory("user");
        prefs.put("n", PrefValue::Int(1)).unwrap();
        let err = prefs.get("n", PrefValue::String(String::new())).unwrap_err();
        assert!(
            matches!(err, PrefsError::Store(StoreError::TypeMismatch { .. })),
            "expected TypeMismatch, got: {err}"
        );
    }

    #[test]
    fn empty_key_is_rejected() {
        let prefs = Preferences::in_memory("user");
        assert!(prefs.put("", PrefValue::Bool(true)).is_err());
        assert!(prefs.get("", PrefValue::Bool(true)).is_err());
    }

    // -----------------------------------------------------------------------
    // Object path
    // -----------------------------------------------------------------------

    #[test]
    fn object_value_is_stored_as_json_text() {
        let prefs = Preferences::in_memory("user");
        prefs.put("obj", PrefValue::Object(json!({"a": [1, 2]}))).unwrap();

        assert_eq!(
            prefs.raw("obj").unwrap(),
            Some(StoredValue::String(r#"{"a":[1,2]}"#.into()))
        );
        assert_eq!(
            prefs.get("obj", PrefValue::Object(json!(null))).unwrap(),
            PrefValue::Object(json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn typed_object_round_trip() {
        let prefs = Preferences::in_memory("user");
        let profile = Profile {
            name: "Ada".into(),
            age: 36,
            languages: vec!["en".into(), "fr".into()],
        };
        prefs.put_object("profile", &profile).unwrap();

        let fallback = Profile {
            name: String::new(),
            age: 0,
            languages: vec![],
        };
        assert_eq!(prefs.get_object("profile", fallback).unwrap(), profile);
    }

    #[test]
    fn object_parse_failure_propagates() {
        let prefs = Preferences::in_memory("user");
        prefs.put("obj", PrefValue::String("not json".into())).unwrap();
        let err = prefs.get("obj", PrefValue::Object(json!({}))).unwrap_err();
        assert!(matches!(err, PrefsError::Deserialize { .. }), "got: {err}");
    }

    #[test]
    fn object_wrong_shape_propagates() {
        let prefs = Preferences::in_memory("user");
        prefs.put_object("profile", &json!({"name": "Ada"})).unwrap();
        let fallback = Profile {
            name: String::new(),
            age: 0,
            languages: vec![],
        };
        assert!(matches!(
            prefs.get_object("profile", fallback).unwrap_err(),
            PrefsError::Deserialize { .. }
        ));
    }

    #[test]
    fn object_read_of_non_string_entry_is_a_mismatch() {
        let prefs = Preferences::in_memory("user");
        prefs.put_as("count", 3i32).unwrap();
        let err = prefs.get_object::<BTreeMap<String, u32>>("count", BTreeMap::new()).unwrap_err();
        assert!(matches!(err, PrefsError::Store(StoreError::TypeMismatch { .. })));
    }

    #[test]
    fn unserializable_object_is_reported() {
        // JSON object keys must be strings.
        let prefs = Preferences::in_memory("user");
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1u8);
        let err = prefs.put_object("bad", &map).unwrap_err();
        assert!(matches!(err, PrefsError::Serialize { .. }), "got: {err}");
        assert!(!prefs.contains("bad").unwrap());
    }

    // -----------------------------------------------------------------------
    // Typed helpers and housekeeping
    // -----------------------------------------------------------------------

    #[test]
    fn typed_helpers() {
        let prefs = Preferences::in_memory("app_settings");
        prefs.put_as("dark_mode", true).unwrap();
        prefs.put_as("volume", 0.8f32).unwrap();
        prefs.put_as("launches", 5i32).unwrap();
        prefs.put_as("installed_at", 1_700_000_000i64).unwrap();
        prefs.put_as("locale", "en-GB".to_string()).unwrap();

        assert!(prefs.get_bool("dark_mode", false).unwrap());
        assert_eq!(prefs.get_as("volume", 0.0f32).unwrap(), 0.8);
        assert_eq!(prefs.get_as("launches", 0i32).unwrap(), 5);
        assert_eq!(prefs.get_as("installed_at", 0i64).unwrap(), 1_700_000_000);
        assert_eq!(prefs.get_string("locale", "").unwrap(), "en-GB");
        assert!(prefs.get_string_set("none", BTreeSet::new()).unwrap().is_empty());
    }

    #[test]
    fn remove_clear_and_keys() {
        let prefs = Preferences::in_memory("user");
        prefs.put_as("a", 1i32).unwrap();
        prefs.put_as("b", 2i32).unwrap();
        assert_eq!(prefs.keys().unwrap(), vec!["a", "b"]);

        assert!(prefs.remove("a").unwrap());
        assert!(!prefs.remove("a").unwrap());
        assert_eq!(prefs.keys().unwrap(), vec!["b"]);

        prefs.clear().unwrap();
        assert!(prefs.keys().unwrap().is_empty());
    }

    #[test]
    fn clones_share_the_store() {
        let prefs = Preferences::in_memory("user");
        let other = prefs.clone();
        prefs.put_as("shared", true).unwrap();
        assert!(other.get_bool("shared", false).unwrap());
        assert_eq!(other.scope_name(), "user");
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn primitive() -> impl Strategy<Value = PrefValue> {
        prop_oneof![
            any::<bool>().prop_map(PrefValue::Bool),
            (-1.0e6f32..1.0e6f32).prop_map(PrefValue::Float),
            any::<i32>().prop_map(PrefValue::Int),
            any::<i64>().prop_map(PrefValue::Long),
            ".*".prop_map(PrefValue::String),
            proptest::collection::btree_set("[a-z]{0,8}", 0..6).prop_map(PrefValue::StringSet),
        ]
    }

    fn default_like(value: &PrefValue) -> PrefValue {
        match value {
            PrefValue::Bool(_) => PrefValue::Bool(false),
            PrefValue::Float(_) => PrefValue::Float(0.0),
            PrefValue::Int(_) => PrefValue::Int(0),
            PrefValue::Long(_) => PrefValue::Long(0),
            PrefValue::String(_) => PrefValue::String(String::new()),
            PrefValue::StringSet(_) => PrefValue::StringSet(BTreeSet::new()),
            PrefValue::Object(_) => PrefValue::Object(serde_json::Value::Null),
        }
    }

    proptest! {
        #[test]
        fn put_then_get_returns_written_value(key in "[a-z_]{1,16}", value in primitive()) {
            let prefs = Preferences::in_memory("user");
            prefs.put(&key, value.clone()).unwrap();
            prop_assert_eq!(prefs.get(&key, default_like(&value)).unwrap(), value);
        }

        #[test]
        fn unset_key_returns_default(key in "[a-z_]{1,16}", default in primitive()) {
            let prefs = Preferences::in_memory("user");
            prop_assert_eq!(prefs.get(&key, default.clone()).unwrap(), default);
        }
    }
}
