//! Named parameter sets

use super::error::{DatabaseError, Result};
use super::value::Param;
use std::collections::BTreeMap;

/// Mapping from parameter name to value for one statement call.
///
/// Names are unique; inserting a name twice keeps the last value. Iteration
/// is ordered by name so binding and logging are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<String, Param>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Param>) -> Option<Param> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a parameter set from a JSON object.
    ///
    /// Nested arrays or objects have no native parameter type and fail with
    /// [`DatabaseError::UnsupportedType`].
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| Param::try_from(value).map(|param| (name, param)))
                .collect(),
            serde_json::Value::Null => Ok(Self::new()),
            other => Err(DatabaseError::unsupported_type(json_kind(&other))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a Param);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Build a [`ParameterSet`] from `name => value` pairs.
///
/// ```rust
/// use rust_sql_executor::params;
///
/// let params = params! { "id" => 1, "name" => "alice", "score" => None::<f64> };
/// assert_eq!(params.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::core::ParameterSet::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::core::ParameterSet::new()$(.with($name, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_insert_wins() {
        let params = ParameterSet::new().with("id", 1).with("id", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id"), Some(&Param::Int(2)));
    }

    #[test]
    fn test_macro() {
        let params = crate::params! { "b" => true, "a" => "x" };
        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(crate::params! {}.is_empty());
    }

    #[test]
    fn test_from_iter() {
        let params: ParameterSet = vec![("x", 1), ("y", 2)].into_iter().collect();
        assert!(params.contains("x"));
        assert!(params.contains("y"));
    }

    #[test]
    fn test_from_json() {
        let params = ParameterSet::from_json(json!({"id": 1, "name": "a", "gone": null})).unwrap();
        assert_eq!(params.get("id"), Some(&Param::Int(1)));
        assert_eq!(params.get("gone"), Some(&Param::Null));

        let err = ParameterSet::from_json(json!({"ids": [1, 2]})).unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedType { .. }));

        let err = ParameterSet::from_json(json!("scalar")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid SQL parameter type: string");
    }
}
