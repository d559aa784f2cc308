use std::{fmt, str::FromStr};

use crate::ModelError;

/// Key–value pair holding one environment variable.
///
/// Both fields are plain UTF-8 strings with no validation applied beyond
/// the `KEY=VALUE` split when parsing. `FromStr` and `Display` are the
/// wire codec: [`crate::Env`] serializes as a list of `KEY=VALUE` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Name of the variable.
    key: String,
    /// Value associated with the key.
    value: String,
}

impl KeyValue {
    /// Create a new key–value pair.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(String, String)> for KeyValue {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for KeyValue {
    fn from((key, value): (&str, &str)) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl FromStr for KeyValue {
    type Err = ModelError;

    /// Parse a `KEY=VALUE` string.
    ///
    /// Splits on the first `=`; the value may itself contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| ModelError::InvalidEnvEntry(s.to_string()))?;
        if key.is_empty() {
            return Err(ModelError::InvalidEnvEntry(s.to_string()));
        }
        Ok(Self::new(key, value))
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyValue;
    use crate::ModelError;

    #[test]
    fn new_sets_key_and_value() {
        let kv = KeyValue::new("FOO", "bar");
        assert_eq!(kv.key(), "FOO");
        assert_eq!(kv.value(), "bar");
    }

    #[test]
    fn from_str_tuple_creates_keyvalue() {
        let kv: KeyValue = ("FOO", "bar").into();
        assert_eq!(kv.key(), "FOO");
        assert_eq!(kv.value(), "bar");
    }

    #[test]
    fn parses_key_value_entry() {
        let kv: KeyValue = "FOO=bar".parse().unwrap();
        assert_eq!(kv.key(), "FOO");
        assert_eq!(kv.value(), "bar");
    }

    #[test]
    fn parse_splits_on_first_equals_only() {
        let kv: KeyValue = "PATH=/usr/bin:/bin=extra".parse().unwrap();
        assert_eq!(kv.key(), "PATH");
        assert_eq!(kv.value(), "/usr/bin:/bin=extra");
    }

    #[test]
    fn parse_allows_empty_value() {
        let kv: KeyValue = "EMPTY=".parse().unwrap();
        assert_eq!(kv.key(), "EMPTY");
        assert_eq!(kv.value(), "");
    }

    #[test]
    fn parse_rejects_missing_separator_and_empty_key() {
        for bad in ["NOEQUALS", "=value", ""] {
            let parsed = bad.parse::<KeyValue>();
            assert!(
                matches!(parsed, Err(ModelError::InvalidEnvEntry(_))),
                "expected InvalidEnvEntry for {bad:?}, got {parsed:?}"
            );
        }
    }

    #[test]
    fn display_round_trips_entry() {
        let kv = KeyValue::new("FOO", "bar=baz");
        assert_eq!(kv.to_string(), "FOO=bar=baz");

        let back: KeyValue = kv.to_string().parse().unwrap();
        assert_eq!(back, kv);
    }
}
