//! Search filter model
//!
//! A [`FilterSet`] maps each recognised [`FilterKey`] to an optional scalar value. The
//! raw set mirrors a search form: keys may be present with an empty string or `null`.
//! Before anything is transmitted, [`FilterSet::normalize`] strips those entries so the
//! backend only ever sees criteria that were actually filled in.
//!
//! Normalization never coerces types and never validates ranges: `min_price = "200000"`
//! goes out as a string, and `min_price > max_price` is the backend's problem.

pub mod error;
pub mod types;

pub use error::FilterError;
pub use types::{FilterKey, FilterValue, ListParams, SearchRequest};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from filter key to optional value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<FilterKey, Option<FilterValue>>);

impl FilterSet {
    /// An empty set: no key present
    pub fn new() -> Self {
        Self::default()
    }

    /// The all-empty baseline of a cleared search form.
    ///
    /// Every recognised key is present with an empty value; it normalizes to `{}`.
    pub fn reset() -> Self {
        Self(
            FilterKey::ALL
                .into_iter()
                .map(|key| (key, Some(FilterValue::empty())))
                .collect(),
        )
    }

    /// Set a key, replacing any previous value
    pub fn set(&mut self, key: FilterKey, value: impl Into<FilterValue>) -> &mut Self {
        self.0.insert(key, Some(value.into()));
        self
    }

    /// Keep the key present with an explicit `null`
    pub fn set_null(&mut self, key: FilterKey) -> &mut Self {
        self.0.insert(key, None);
        self
    }

    /// Remove a key entirely
    pub fn clear(&mut self, key: FilterKey) -> Option<FilterValue> {
        self.0.remove(&key).flatten()
    }

    /// Builder form of [`FilterSet::set`]
    pub fn with(mut self, key: FilterKey, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    /// The value held for `key`, if it carries a criterion
    pub fn get(&self, key: FilterKey) -> Option<&FilterValue> {
        self.0
            .get(&key)
            .and_then(Option::as_ref)
            .filter(|value| !value.is_empty())
    }

    /// Whether `key` is present at all, even with an empty value
    pub fn contains_key(&self, key: FilterKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Drop every key whose value is null or an empty string
    pub fn normalize(&self) -> FilterSet {
        Self(
            self.0
                .iter()
                .filter_map(|(key, value)| match value {
                    Some(value) if !value.is_empty() => Some((*key, Some(value.clone()))),
                    _ => None,
                })
                .collect(),
        )
    }

    /// True when at least one filter carries a criterion
    pub fn is_active(&self) -> bool {
        self.0.values().flatten().any(|value| !value.is_empty())
    }

    /// Keys that survive normalization, in canonical order
    pub fn active_keys(&self) -> Vec<FilterKey> {
        self.0
            .iter()
            .filter(|(_, value)| value.as_ref().is_some_and(|v| !v.is_empty()))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Number of keys present, empty or not
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, Option<&FilterValue>)> {
        self.0.iter().map(|(key, value)| (*key, value.as_ref()))
    }

    /// Parse one `key=value` pair from user input.
    ///
    /// The value is kept as text; `city=` yields an empty value that normalizes away.
    pub fn parse_pair(pair: &str) -> Result<(FilterKey, FilterValue), FilterError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| FilterError::MalformedPair(pair.to_string()))?;
        let key: FilterKey = key.parse()?;
        Ok((key, FilterValue::Text(value.to_string())))
    }

    /// Build a set from several `key=value` pairs; later pairs win
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for pair in pairs {
            let (key, value) = Self::parse_pair(pair.as_ref())?;
            set.set(key, value);
        }
        Ok(set)
    }
}

impl FromIterator<(FilterKey, FilterValue)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (FilterKey, FilterValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key, Some(value))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyType;
    use serde_json::json;

    fn mixed_set() -> FilterSet {
        let mut set = FilterSet::new();
        set.set(FilterKey::City, "Austin")
            .set(FilterKey::Query, "")
            .set(FilterKey::State, "  ")
            .set(FilterKey::MinPrice, "200000")
            .set(FilterKey::IsFeatured, false)
            .set_null(FilterKey::Status);
        set
    }

    #[test]
    fn test_normalize_strips_empty_and_null() {
        let normalized = mixed_set().normalize();

        assert_eq!(
            normalized.active_keys(),
            vec![FilterKey::MinPrice, FilterKey::City, FilterKey::IsFeatured]
        );
        assert_eq!(normalized.len(), 3);
        for (_, value) in normalized.iter() {
            let value = value.expect("normalized set holds no null");
            assert!(!value.is_empty());
        }
    }

    #[test]
    fn test_normalize_keeps_exactly_the_filled_keys() {
        let raw = mixed_set();
        let normalized = raw.normalize();

        for key in FilterKey::ALL {
            assert_eq!(normalized.contains_key(key), raw.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_normalize_does_not_coerce() {
        let normalized = mixed_set().normalize();
        assert_eq!(
            normalized.get(FilterKey::MinPrice),
            Some(&FilterValue::Text("200000".to_string()))
        );
        assert_eq!(normalized.get(FilterKey::IsFeatured), Some(&FilterValue::Flag(false)));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = mixed_set().normalize();
        assert_eq!(once.normalize(), once);
    }

    #[test]
    fn test_reset_baseline() {
        let baseline = FilterSet::reset();

        assert_eq!(baseline.len(), FilterKey::ALL.len());
        assert!(FilterKey::ALL.iter().all(|key| baseline.contains_key(*key)));
        assert!(!baseline.is_active());
        assert!(baseline.normalize().is_empty());
        assert_ne!(baseline, baseline.normalize());
    }

    #[test]
    fn test_query_only_empty_is_inactive() {
        let set = FilterSet::new().with(FilterKey::Query, "");
        assert!(set.contains_key(FilterKey::Query));
        assert!(!set.is_active());
        assert_eq!(set.normalize(), FilterSet::new());
    }

    #[test]
    fn test_no_range_validation() {
        let set = FilterSet::new()
            .with(FilterKey::MinPrice, 500_000i64)
            .with(FilterKey::MaxPrice, 100_000i64);
        assert_eq!(set.normalize().len(), 2);
    }

    #[test]
    fn test_clear_removes_key() {
        let mut set = FilterSet::new().with(FilterKey::PropertyType, PropertyType::Villa);
        assert_eq!(
            set.clear(FilterKey::PropertyType),
            Some(FilterValue::from("villa"))
        );
        assert!(set.is_empty());
        assert_eq!(set.clear(FilterKey::PropertyType), None);
    }

    #[test]
    fn test_parse_pairs() {
        let set = FilterSet::from_pairs(["city=Austin", "min_price=200000", "query="]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.active_keys(), vec![FilterKey::MinPrice, FilterKey::City]);

        let err = FilterSet::from_pairs(["city"]).unwrap_err();
        assert_eq!(err, FilterError::MalformedPair("city".to_string()));

        let err = FilterSet::from_pairs(["color=red"]).unwrap_err();
        assert_eq!(err, FilterError::UnknownKey("color".to_string()));
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let set = FilterSet::new()
            .with(FilterKey::City, "Austin")
            .with(FilterKey::MinBedrooms, 3u32);
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({"min_bedrooms": 3, "city": "Austin"})
        );

        let decoded: FilterSet =
            serde_json::from_value(json!({"city": "Austin", "query": "", "status": null}))
                .unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.active_keys(), vec![FilterKey::City]);
    }
}
