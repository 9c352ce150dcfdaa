//! Resource namespaces: each method maps one intent to exactly one HTTP call.

use crate::client::error::Result;
use crate::client::traits::{ApiRequest, Transport};
use crate::client::ApiClient;
use crate::filters::{ListParams, SearchRequest};
use crate::models::{
    Credentials, Inquiry, InquiryCreate, Message, Property, PropertyCreate, PropertyUpdate,
    Registration, Stats, Token, User,
};
use crate::session::Session;
use serde::Serialize;
use serde_json::Value;

fn property_path(id: &str) -> String {
    format!("/properties/{}", urlencoding::encode(id))
}

fn favorite_path(property_id: &str) -> String {
    format!("/favorites/{}", urlencoding::encode(property_id))
}

fn to_body<B: Serialize>(body: &B) -> Result<Value> {
    Ok(serde_json::to_value(body)?)
}

/// `/properties`
pub struct Properties<'a, T: Transport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: Transport> Properties<'_, T> {
    /// `GET /properties?page=..&limit=..`
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Property>> {
        self.client
            .call(ApiRequest::get("/properties").query(params.to_query()))
            .await
    }

    /// `GET /properties/{id}`
    pub async fn get(&self, id: &str) -> Result<Property> {
        self.client.call(ApiRequest::get(property_path(id))).await
    }

    /// `POST /properties`
    pub async fn create(&self, session: &Session, data: &PropertyCreate) -> Result<Property> {
        let request = ApiRequest::post("/properties")
            .body(to_body(data)?)
            .bearer(session.token());
        self.client.call(request).await
    }

    /// `PUT /properties/{id}`
    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        data: &PropertyUpdate,
    ) -> Result<Property> {
        let request = ApiRequest::put(property_path(id))
            .body(to_body(data)?)
            .bearer(session.token());
        self.client.call(request).await
    }

    /// `DELETE /properties/{id}`
    pub async fn delete(&self, session: &Session, id: &str) -> Result<Message> {
        let request = ApiRequest::delete(property_path(id)).bearer(session.token());
        self.client.call(request).await
    }

    /// `POST /properties/search` with filters, page and limit in one body
    pub async fn search(&self, search: &SearchRequest) -> Result<Vec<Property>> {
        let request = ApiRequest::post("/properties/search").body(to_body(search)?);
        self.client.call(request).await
    }
}

/// `/favorites`
pub struct Favorites<'a, T: Transport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: Transport> Favorites<'_, T> {
    /// Listings the signed-in user has favorited
    pub async fn list(&self, session: &Session) -> Result<Vec<Property>> {
        let request = ApiRequest::get("/favorites").bearer(session.token());
        self.client.call(request).await
    }

    pub async fn add(&self, session: &Session, property_id: &str) -> Result<Message> {
        let request = ApiRequest::post(favorite_path(property_id)).bearer(session.token());
        self.client.call(request).await
    }

    pub async fn remove(&self, session: &Session, property_id: &str) -> Result<Message> {
        let request = ApiRequest::delete(favorite_path(property_id)).bearer(session.token());
        self.client.call(request).await
    }
}

/// `/inquiries`
pub struct Inquiries<'a, T: Transport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: Transport> Inquiries<'_, T> {
    pub async fn list(&self, session: &Session) -> Result<Vec<Inquiry>> {
        let request = ApiRequest::get("/inquiries").bearer(session.token());
        self.client.call(request).await
    }

    pub async fn create(&self, session: &Session, data: &InquiryCreate) -> Result<Inquiry> {
        let request = ApiRequest::post("/inquiries")
            .body(to_body(data)?)
            .bearer(session.token());
        self.client.call(request).await
    }
}

/// `/stats`
pub struct StatsApi<'a, T: Transport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: Transport> StatsApi<'_, T> {
    pub async fn get(&self) -> Result<Stats> {
        self.client.call(ApiRequest::get("/stats")).await
    }
}

/// `/auth`
pub struct Auth<'a, T: Transport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: Transport> Auth<'_, T> {
    pub async fn register(&self, data: &Registration) -> Result<Token> {
        let request = ApiRequest::post("/auth/register").body(to_body(data)?);
        self.client.call(request).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Token> {
        let request = ApiRequest::post("/auth/login").body(to_body(credentials)?);
        self.client.call(request).await
    }

    /// The account behind the session's token
    pub async fn me(&self, session: &Session) -> Result<User> {
        let request = ApiRequest::get("/auth/me").bearer(session.token());
        self.client.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::MockTransport;
    use crate::client::traits::Method;
    use crate::client::ApiClient;
    use crate::filters::{FilterKey, FilterSet, ListParams, SearchRequest};
    use crate::models::{InquiryCreate, PropertyUpdate, Registration, UserRole};
    use crate::session::Session;
    use serde_json::json;

    fn property_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Listing",
            "property_type": "apartment",
            "status": "for_sale",
            "price": 100000.0
        })
    }

    #[tokio::test]
    async fn test_list_sends_query_params() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_json(json!([property_json("a")]));

        let properties = client
            .properties()
            .list(&ListParams::page(1, 12))
            .await
            .unwrap();

        assert_eq!(properties.len(), 1);
        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/properties");
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "12".to_string())
            ]
        );
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_search_posts_single_body() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_json(json!([]));

        let filters = FilterSet::new()
            .with(FilterKey::City, "Austin")
            .with(FilterKey::Status, "");
        client
            .properties()
            .search(&SearchRequest::new(&filters, 2, 12))
            .await
            .unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/properties/search");
        assert!(request.query.is_empty());
        assert_eq!(
            request.body,
            Some(json!({"city": "Austin", "page": 2, "limit": 12}))
        );
    }

    #[tokio::test]
    async fn test_ids_are_percent_encoded() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_json(property_json("a b/c"));

        client.properties().get("a b/c").await.unwrap();
        assert_eq!(
            client.transport().last_request().unwrap().path,
            "/properties/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_guarded_calls_carry_bearer() {
        let client = ApiClient::new(MockTransport::new());
        let session = Session::with_token("tok");
        client
            .transport()
            .push_json(json!({"message": "Property added to favorites"}))
            .push_json(json!({"message": "Property removed from favorites"}))
            .push_json(property_json("p-1"));

        client.favorites().add(&session, "p-1").await.unwrap();
        client.favorites().remove(&session, "p-1").await.unwrap();
        let update = PropertyUpdate {
            price: Some(1.0),
            ..Default::default()
        };
        client
            .properties()
            .update(&session, "p-1", &update)
            .await
            .unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/favorites/p-1");
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[2].method, Method::Put);
        assert_eq!(requests[2].body, Some(json!({"price": 1.0})));
        assert!(requests
            .iter()
            .all(|r| r.bearer.as_deref() == Some("tok")));
    }

    #[tokio::test]
    async fn test_anonymous_session_sends_no_bearer() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_status(403, "Not authenticated");

        let err = client
            .inquiries()
            .list(&Session::anonymous())
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(client.transport().last_request().unwrap().bearer, None);
    }

    #[tokio::test]
    async fn test_inquiry_create_payload() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_json(json!({
            "id": "i-1",
            "property_id": "p-1",
            "user_id": "u-1",
            "message": "Is it still available?",
            "contact_email": "buyer@example.com",
            "status": "new"
        }));

        let inquiry = client
            .inquiries()
            .create(
                &Session::with_token("tok"),
                &InquiryCreate {
                    property_id: "p-1".to_string(),
                    message: "Is it still available?".to_string(),
                    contact_email: "buyer@example.com".to_string(),
                    contact_phone: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(inquiry.status, "new");
        assert_eq!(
            client.transport().last_request().unwrap().body,
            Some(json!({
                "property_id": "p-1",
                "message": "Is it still available?",
                "contact_email": "buyer@example.com"
            }))
        );
    }

    #[tokio::test]
    async fn test_stats_tolerates_missing_fields() {
        let client = ApiClient::new(MockTransport::new());
        client
            .transport()
            .push_json(json!({"total_properties": 3, "properties_for_sale": 2}));

        let stats = client.stats().get().await.unwrap();
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.properties_for_rent, 0);
        assert_eq!(stats.total_users, 0);
    }

    #[tokio::test]
    async fn test_errors_propagate_verbatim() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_status(404, "Property not found");

        let err = client.properties().get("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Backend returned 404: Property not found");
        assert_eq!(client.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = ApiClient::new(MockTransport::new());
        client.transport().push_json(json!({"unexpected": true}));

        let err = client
            .properties()
            .list(&ListParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::client::ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_register_then_me() {
        let client = ApiClient::new(MockTransport::new());
        let user = json!({
            "id": "u-1",
            "email": "agent@example.com",
            "full_name": "Ana Agent",
            "role": "agent"
        });
        client
            .transport()
            .push_json(json!({"access_token": "tok", "token_type": "bearer", "user": user}))
            .push_json(user.clone());

        let registration = Registration {
            email: "agent@example.com".to_string(),
            password: "secret".to_string(),
            full_name: "Ana Agent".to_string(),
            phone: None,
            role: UserRole::Agent,
        };
        let token = client.auth().register(&registration).await.unwrap();

        let mut session = Session::anonymous();
        session.login(token);
        let me = client.auth().me(&session).await.unwrap();
        assert_eq!(me.role, UserRole::Agent);

        let requests = client.transport().requests();
        assert_eq!(requests[0].path, "/auth/register");
        assert_eq!(
            requests[0].body,
            Some(json!({
                "email": "agent@example.com",
                "password": "secret",
                "full_name": "Ana Agent",
                "role": "agent"
            }))
        );
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].path, "/auth/me");
        assert_eq!(requests[1].bearer.as_deref(), Some("tok"));
    }
}
