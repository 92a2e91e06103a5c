//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all board-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

/// HTTP test client carrying an optional bearer token
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// Bearer token attached to board requests, if any
    pub token: Option<String>,
}

impl TestClient {
    /// Creates a new unauthenticated client
    ///
    /// Use this for testing authentication flows.
    /// For most tests, use `authenticated()` instead.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Creates a client pre-authenticated as the given user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String, email: &str, password: &str) -> Self {
        let mut client = Self::new(base_url);

        let response = client.login(email, password).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Test user authentication failed"
        );
        let token = response.text().await.expect("Failed to read login body");
        assert!(!token.is_empty(), "Login returned an empty token");
        client.token = Some(token);

        client
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /v1/auth/login with HTTP Basic credentials
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/v1/auth/login", self.base_url))
            .basic_auth(email, Some(password))
            .send()
            .await
            .expect("Login request failed")
    }

    // ========================================================================
    // Board Endpoints
    // ========================================================================

    /// GET /v1/board/listings
    pub async fn get_listings(&self) -> Response {
        self.authorize(
            self.client
                .get(format!("{}/v1/board/listings", self.base_url)),
        )
        .send()
        .await
        .expect("Get listings request failed")
    }

    /// POST /v1/board/listings
    pub async fn create_listing(&self, body: &Value) -> Response {
        self.authorize(
            self.client
                .post(format!("{}/v1/board/listings", self.base_url)),
        )
        .json(body)
        .send()
        .await
        .expect("Create listing request failed")
    }

    /// PUT /v1/board/listings/{id}
    pub async fn update_listing(&self, id: i64, body: &Value) -> Response {
        self.authorize(
            self.client
                .put(format!("{}/v1/board/listings/{}", self.base_url, id)),
        )
        .json(body)
        .send()
        .await
        .expect("Update listing request failed")
    }

    /// DELETE /v1/board/listings/{id}
    pub async fn delete_listing(&self, id: i64) -> Response {
        self.authorize(
            self.client
                .delete(format!("{}/v1/board/listings/{}", self.base_url, id)),
        )
        .send()
        .await
        .expect("Delete listing request failed")
    }

    /// GET /v1/board/companies
    pub async fn get_companies(&self) -> Response {
        self.authorize(
            self.client
                .get(format!("{}/v1/board/companies", self.base_url)),
        )
        .send()
        .await
        .expect("Get companies request failed")
    }

    /// GET /v1/board/contacts
    pub async fn get_contacts(&self) -> Response {
        self.authorize(
            self.client
                .get(format!("{}/v1/board/contacts", self.base_url)),
        )
        .send()
        .await
        .expect("Get contacts request failed")
    }

    /// POST /v1/board/contacts
    pub async fn create_contact(&self, body: &Value) -> Response {
        self.authorize(
            self.client
                .post(format!("{}/v1/board/contacts", self.base_url)),
        )
        .json(body)
        .send()
        .await
        .expect("Create contact request failed")
    }

    /// DELETE /v1/board/listings/{listing_id}/contacts/{contact_id}
    pub async fn remove_contact(&self, listing_id: i64, contact_id: i64) -> Response {
        self.authorize(self.client.delete(format!(
            "{}/v1/board/listings/{}/contacts/{}",
            self.base_url, listing_id, contact_id
        )))
        .send()
        .await
        .expect("Remove contact request failed")
    }
}
