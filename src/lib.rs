//! Client library for a real-estate listing backend.
//!
//! - [`filters`]: the recognised search filters and their normalization
//! - [`search`]: list-vs-search routing, pagination and browse view state
//! - [`favorites`]: the favorite toggle protocol
//! - [`client`]: the typed REST client and its transports
//! - [`session`], [`notify`], [`config`]: auth state, user notices, environment

pub mod cli;
pub mod client;
pub mod config;
pub mod favorites;
pub mod filters;
pub mod models;
pub mod notify;
pub mod render;
pub mod search;
pub mod session;

pub use client::{ApiClient, ClientError};
pub use filters::{FilterKey, FilterSet, FilterValue};
pub use models::Property;
pub use search::{ResultPage, SearchOrchestrator};
pub use session::Session;
