//! Typed client for the listing backend
//!
//! [`ApiClient`] groups the backend's resources into namespaces (`properties`,
//! `favorites`, `inquiries`, `stats`, `auth`). Every namespace method is a thin
//! mapping from one intent to one [`ApiRequest`]; the actual I/O happens in a
//! [`Transport`], which is [`HttpTransport`] in production and the in-memory
//! `MockTransport` in tests.

pub mod error;
pub mod http;
#[doc(hidden)]
pub mod mock;
pub mod resources;
pub mod traits;

pub use error::{ClientError, Result};
pub use http::HttpTransport;
#[doc(hidden)]
pub use mock::{MockResponse, MockTransport};
pub use resources::{Auth, Favorites, Inquiries, Properties, StatsApi};
pub use traits::{ApiRequest, Method, Transport};

use serde::de::DeserializeOwned;
use tracing::debug;

pub struct ApiClient<T: Transport = HttpTransport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Client talking HTTP to `<backend_url>/api`
    pub fn connect(backend_url: &str) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(backend_url)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn properties(&self) -> Properties<'_, T> {
        Properties { client: self }
    }

    pub fn favorites(&self) -> Favorites<'_, T> {
        Favorites { client: self }
    }

    pub fn inquiries(&self) -> Inquiries<'_, T> {
        Inquiries { client: self }
    }

    pub fn stats(&self) -> StatsApi<'_, T> {
        StatsApi { client: self }
    }

    pub fn auth(&self) -> Auth<'_, T> {
        Auth { client: self }
    }

    pub(crate) async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        debug!(
            "{} {}{}",
            request.method,
            self.transport.base_url(),
            request.path
        );
        let body = self.transport.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}
