//! Query string construction
//!
//! Absent values are never serialized. Present values are sent verbatim,
//! including `0` and the empty string.

/// Flat, ordered list of query parameters with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to the stringified value, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Sets `key` only when a value is present
    pub fn set_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Builder form of [`QueryParams::set_opt`]
    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set_opt(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order, ready for a URL encoder
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set_opt(key, value);
        }
        params
    }
}

/// Conversion of a filter object into query parameters
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl ToQuery for QueryParams {
    fn to_query(&self) -> QueryParams {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_omitted() {
        let params: QueryParams = [
            ("status", Some("running")),
            ("branch", None),
            ("search", Some("")),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.len(), 2);
        assert!(!params.contains_key("branch"));
        assert_eq!(params.get("search"), Some(""));
    }

    #[test]
    fn test_falsy_values_are_kept() {
        let params = QueryParams::new()
            .with_opt("page", Some(0))
            .with_opt("pageSize", None::<u32>);

        assert_eq!(params.pairs(), &[("page".to_string(), "0".to_string())]);
    }

    #[test]
    fn test_keys_appear_once() {
        let mut params = QueryParams::new();
        params.set("page", 1).set("page", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let params: QueryParams = [("b", Some(1)), ("a", Some(2)), ("c", Some(3))]
            .into_iter()
            .collect();
        let keys: Vec<_> = params.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }
}
