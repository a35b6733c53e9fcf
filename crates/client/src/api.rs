//! Typed client for the Stockroom HTTP API.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockroom_core::ProductDraft;
use stockroom_core::ProductId;
use stockroom_core::analytics::AnalyticsRecord;
use stockroom_core::api::{
    ErrorBody, LoginRequest, MostAddedResponse, ProductCreated, ProductPage, QuantityUpdate,
    QuantityUpdated, SignupRequest, TokenResponse,
};

use crate::error::ClientError;
use crate::session::Session;

/// Stockroom API client.
///
/// Holds the base URL and, once logged in, the bearer token sent with
/// every protected call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a logged-out client for `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: None,
        }
    }

    /// Create a client carrying the session's URL and token.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let mut client = Self::new(session.api_url.clone());
        client.token.clone_from(&session.token);
        client
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Snapshot of the client state for persisting.
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            api_url: self.base_url.clone(),
            token: self.token.clone(),
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Register an account and keep the returned token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the server's message on rejection.
    pub async fn signup(&mut self, request: &SignupRequest) -> Result<TokenResponse, ClientError> {
        let response: TokenResponse = self
            .send(self.request(Method::POST, "/auth/signup").json(request))
            .await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// Log in and keep the returned token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with the server's message on rejection.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let response: TokenResponse = self
            .send(self.request(Method::POST, "/auth/login").json(request))
            .await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch one page of products.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotLoggedIn` without a token, otherwise any
    /// server or transport failure.
    pub async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, ClientError> {
        let path = format!("/products?page={page}&limit={limit}");
        self.send(self.authorized(Method::GET, &path)?).await
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<ProductCreated, ClientError> {
        self.send_json(Method::POST, "/products", draft).await
    }

    /// Replace the stock level of a product.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn update_quantity(
        &self,
        id: ProductId,
        quantity: i64,
    ) -> Result<QuantityUpdated, ClientError> {
        let body = QuantityUpdate {
            quantity: Some(quantity),
        };
        self.send_json(Method::PUT, &format!("/products/{id}/quantity"), &body)
            .await
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// The most-added report.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn most_added(&self) -> Result<Vec<AnalyticsRecord>, ClientError> {
        let response: MostAddedResponse = self
            .send(self.authorized(Method::GET, "/analytics/most-added")?)
            .await?;
        Ok(response.products)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.authorized(method, path)?.json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "Request failed before a response");
            ClientError::Network(e)
        })?;
        handle_response(response).await
    }
}

/// Decode a success body or turn a failure into `ClientError::Api`.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()));
    }

    // Prefer the server's message; fall back to the status text.
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_owned()
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
