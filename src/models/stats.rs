use serde::{Deserialize, Deserializer, Serialize};

/// Catalog counters shown on the landing view.
///
/// Every counter falls back to 0 when the backend omits it or sends `null`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_properties: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub properties_for_sale: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub properties_for_rent: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_users: u64,
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}
