use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key/value annotations attached to design nodes.
///
/// Each key maps to an ordered list of values. Keys keep their insertion
/// order so generators see annotations in the order they were declared.
/// The semantic of a key is specific to the generator that reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaExpr(IndexMap<String, Vec<String>>);

impl MetaExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values recorded under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces all values recorded under `key`.
    pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), values);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Most recently added value under `key`, if any.
    pub fn last_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.last()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an independent copy of the map.
    ///
    /// Value lists are copied too: pushing to a list of the duplicate never
    /// shows up in the original and vice versa.
    pub fn duplicate(&self) -> Self {
        let mut dup = IndexMap::with_capacity(self.0.len());
        for (key, values) in &self.0 {
            dup.insert(key.clone(), values.clone());
        }
        Self(dup)
    }

    /// Merges `other` into `self`, appending values of shared keys after the
    /// existing ones. New keys are added at the end.
    pub fn merge(&mut self, other: &MetaExpr) {
        for (key, values) in &other.0 {
            self.0
                .entry(key.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for MetaExpr
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = MetaExpr::new();
        for (key, values) in iter {
            meta.set(key, values.into_iter().map(Into::into).collect());
        }
        meta
    }
}
