use crate::filters::error::FilterError;
use crate::filters::FilterSet;
use crate::models::{PropertyStatus, PropertyType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A recognised search filter key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Query,
    PropertyType,
    Status,
    MinPrice,
    MaxPrice,
    MinBedrooms,
    MaxBedrooms,
    MinBathrooms,
    MaxBathrooms,
    City,
    State,
    MinArea,
    MaxArea,
    IsFeatured,
}

impl FilterKey {
    /// Every key, in the order the search form lays them out
    pub const ALL: [FilterKey; 14] = [
        FilterKey::Query,
        FilterKey::PropertyType,
        FilterKey::Status,
        FilterKey::MinPrice,
        FilterKey::MaxPrice,
        FilterKey::MinBedrooms,
        FilterKey::MaxBedrooms,
        FilterKey::MinBathrooms,
        FilterKey::MaxBathrooms,
        FilterKey::City,
        FilterKey::State,
        FilterKey::MinArea,
        FilterKey::MaxArea,
        FilterKey::IsFeatured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Query => "query",
            FilterKey::PropertyType => "property_type",
            FilterKey::Status => "status",
            FilterKey::MinPrice => "min_price",
            FilterKey::MaxPrice => "max_price",
            FilterKey::MinBedrooms => "min_bedrooms",
            FilterKey::MaxBedrooms => "max_bedrooms",
            FilterKey::MinBathrooms => "min_bathrooms",
            FilterKey::MaxBathrooms => "max_bathrooms",
            FilterKey::City => "city",
            FilterKey::State => "state",
            FilterKey::MinArea => "min_area",
            FilterKey::MaxArea => "max_area",
            FilterKey::IsFeatured => "is_featured",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| FilterError::UnknownKey(wanted.to_string()))
    }
}

/// Scalar value held by a filter.
///
/// Values are carried as given: a numeric-looking string stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FilterValue {
    /// The empty form-field value
    pub fn empty() -> Self {
        FilterValue::Text(String::new())
    }

    /// Empty strings (including whitespace-only ones) carry no criterion
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.trim().is_empty(),
            FilterValue::Flag(_) | FilterValue::Number(_) => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Flag(flag) => write!(f, "{}", flag),
            FilterValue::Number(number) => write!(f, "{}", number),
            FilterValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<f64> for FilterValue {
    /// Non-finite numbers have no JSON form and become the empty value
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(FilterValue::Number)
            .unwrap_or_else(FilterValue::empty)
    }
}

impl From<PropertyType> for FilterValue {
    fn from(value: PropertyType) -> Self {
        FilterValue::Text(value.as_str().to_string())
    }
}

impl From<PropertyStatus> for FilterValue {
    fn from(value: PropertyStatus) -> Self {
        FilterValue::Text(value.as_str().to_string())
    }
}

/// Query parameters of the plain list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListParams {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    /// Minimum price
    pub min_price: Option<f64>,
    /// Maximum price
    pub max_price: Option<f64>,
    pub city: Option<String>,
    /// Only featured listings
    pub is_featured: Option<bool>,
}

impl ListParams {
    /// One page of the unfiltered catalog
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Featured listings shown on the landing view
    pub fn featured(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            is_featured: Some(true),
            ..Default::default()
        }
    }

    /// Query-string pairs; unset parameters are left out
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };

        push("page", self.page.map(|v| v.to_string()));
        push("limit", self.limit.map(|v| v.to_string()));
        push("property_type", self.property_type.map(|v| v.as_str().to_string()));
        push("status", self.status.map(|v| v.as_str().to_string()));
        push("min_price", self.min_price.map(|v| v.to_string()));
        push("max_price", self.max_price.map(|v| v.to_string()));
        push("city", self.city.clone().filter(|c| !c.trim().is_empty()));
        push("is_featured", self.is_featured.map(|v| v.to_string()));

        query
    }
}

/// Body of the search endpoint: the normalized filters plus paging, as one object
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub filters: FilterSet,
    pub page: u32,
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(filters: &FilterSet, page: u32, limit: u32) -> Self {
        Self {
            filters: filters.normalize(),
            page,
            limit,
        }
    }
}
