//! Query string parsing.
//!
//! [`QueryMap`] follows the usual querystring convention: a key that appears
//! once maps to a single value, a repeated key maps to the ordered list of its
//! values.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value of a query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Key appeared once.
    Single(String),
    /// Key appeared several times, values in order of appearance.
    Multiple(Vec<String>),
}

impl QueryValue {
    /// First value.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Multiple(values) => values.first().map(String::as_str),
        }
    }

    /// All values, in order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                *self = Self::Multiple(vec![std::mem::take(first), value]);
            }
            Self::Multiple(values) => values.push(value),
        }
    }
}

/// Parsed query string, keys kept in order of first appearance.
///
/// Serializes as a map, e.g. `{"awesome": "true", "tag": ["a", "b"]}`.
/// Deserializing keeps each value's shape: `{"tag": ["a"]}` stays a
/// one-element [`QueryValue::Multiple`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Parse the query component of a URL.
    #[must_use]
    pub fn from_url(url: &url::Url) -> Self {
        url.query_pairs().into_owned().collect()
    }

    /// Add a value, collecting repeated keys.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, current)) => current.push(value),
            None => self.entries.push((key, QueryValue::Single(value))),
        }
    }

    /// Add a value as-is, merging with an existing entry for the same key.
    fn insert_value(&mut self, key: String, value: QueryValue) {
        let Some((_, current)) = self.entries.iter_mut().find(|(existing, _)| *existing == key)
        else {
            self.entries.push((key, value));
            return;
        };
        match value {
            QueryValue::Single(value) => current.push(value),
            QueryValue::Multiple(values) => {
                for value in values {
                    current.push(value);
                }
            }
        }
    }

    /// Value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there is no parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Flatten back into `(key, value)` pairs, repeated keys grouped together.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .flat_map(|(key, value)| {
                value
                    .values()
                    .into_iter()
                    .map(move |v| (key.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Serialize as an encoded query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs())
            .finish()
    }
}

impl FromIterator<(String, String)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.append(key, value);
        }
        map
    }
}

impl Serialize for QueryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for QueryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QueryMapVisitor;

        impl<'de> Visitor<'de> for QueryMapVisitor {
            type Value = QueryMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of strings or string lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<QueryMap, A::Error> {
                let mut map = QueryMap::new();
                while let Some((key, value)) = access.next_entry::<String, QueryValue>()? {
                    map.insert_value(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(QueryMapVisitor)
    }
}
