//! Field maps: the key/value form data carried in an offer link.

use std::collections::BTreeMap;

/// A single form field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    /// Ordered list, rendered as repeated `key=value` pairs in a query string.
    List(Vec<String>),
}

impl FieldValue {
    /// Empty strings and empty lists are treated as absent.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// String form used in the signing message. Lists are sorted and
    /// concatenated without a separator, so element order never matters.
    pub fn canonical(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::List(items) => {
                let mut sorted: Vec<&str> = items.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                sorted.concat()
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Mapping from field name to value.
///
/// Keys are case-insensitively distinct: inserting `Data_Name` replaces an
/// existing `data_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the value it replaced (if any).
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        let key = key.into();
        let clashing = self
            .entries
            .keys()
            .find(|existing| *existing != &key && existing.eq_ignore_ascii_case(&key))
            .cloned();
        let replaced = clashing.and_then(|k| self.entries.remove(&k));
        self.entries.insert(key, value.into()).or(replaced)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop every field whose value is empty.
    pub fn without_empty(mut self) -> Self {
        self.entries.retain(|_, v| !v.is_empty());
        self
    }

    /// Sub-map restricted to the given keys. Keys not present are ignored.
    pub fn subset<S: AsRef<str>>(&self, keys: &[S]) -> FieldMap {
        self.entries
            .iter()
            .filter(|(k, _)| keys.iter().any(|wanted| wanted.as_ref() == k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Entries ordered by ASCII-lowercased key.
    pub fn sorted_case_insensitive(&self) -> Vec<(&str, &FieldValue)> {
        let mut sorted: Vec<(&str, &FieldValue)> = self.iter().collect();
        sorted.sort_by_cached_key(|(k, _)| k.to_ascii_lowercase());
        sorted
    }

    /// Serialize as `application/x-www-form-urlencoded`. List values become
    /// repeated pairs in list order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            match value {
                FieldValue::Scalar(s) => {
                    serializer.append_pair(key, s);
                }
                FieldValue::List(items) => {
                    for item in items {
                        serializer.append_pair(key, item);
                    }
                }
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
