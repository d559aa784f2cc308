use serde::{Deserialize, Serialize};

use crate::{KeyValue, ModelError};

/// Ordered snapshot of environment variables passed to a job.
///
/// Internally stored as a list of key–value pairs; on the wire it is a list
/// of `KEY=VALUE` strings, parsed back through [`KeyValue`]'s `FromStr`.
/// Entry order is preserved exactly as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>")]
#[serde(into = "Vec<String>")]
pub struct Env(Vec<KeyValue>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all key–value pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Get the value for a key, returning the last matching entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.key() == key)
            .map(|kv| kv.value())
    }

    /// Append a key–value pair to the environment.
    ///
    /// Later entries override earlier ones when queried via [`Env::get`].
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(KeyValue::new(key, value));
    }
}

impl FromIterator<(String, String)> for Env {
    /// Build an environment from `(key, value)` pairs, e.g. `std::env::vars()`.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().map(KeyValue::from).collect())
    }
}

impl TryFrom<Vec<String>> for Env {
    type Error = ModelError;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        let parsed = entries
            .iter()
            .map(|entry| entry.parse())
            .collect::<Result<Vec<KeyValue>, _>>()?;
        Ok(Self(parsed))
    }
}

impl From<Env> for Vec<String> {
    fn from(env: Env) -> Self {
        env.0.iter().map(KeyValue::to_string).collect()
    }
}
