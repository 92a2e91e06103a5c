//! End-to-end tests for per-user data isolation.

mod common;

use common::{TestClient, TestServer, ALICE_EMAIL, ALICE_PASS, BOB_EMAIL, BOB_PASS};
use reqwest::StatusCode;
use serde_json::{json, Value};

const FORBIDDEN_BODY: &str = "You do not have access to this listing";

async fn two_clients(server: &TestServer) -> (TestClient, TestClient) {
    let alice = TestClient::authenticated(server.base_url.clone(), ALICE_EMAIL, ALICE_PASS).await;
    let bob = TestClient::authenticated(server.base_url.clone(), BOB_EMAIL, BOB_PASS).await;
    (alice, bob)
}

#[tokio::test]
async fn users_never_see_each_others_listings() {
    let server = TestServer::spawn().await;
    let (alice, bob) = two_clients(&server).await;

    alice
        .create_listing(&json!({"title": "Alice's", "url": "https://example.com"}))
        .await;

    let bobs_view: Value = bob.get_listings().await.json().await.unwrap();
    assert!(bobs_view.as_array().unwrap().is_empty());

    let alices_view: Value = alice.get_listings().await.json().await.unwrap();
    assert_eq!(alices_view.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn updating_someone_elses_listing_is_forbidden() {
    let server = TestServer::spawn().await;
    let (alice, bob) = two_clients(&server).await;

    let created: Value = alice
        .create_listing(&json!({"title": "Original", "url": "https://example.com"}))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let response = bob
        .update_listing(id, &json!({"title": "Hijacked", "url": "https://evil.example"}))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), FORBIDDEN_BODY);

    // Nothing changed
    let listings: Value = alice.get_listings().await.json().await.unwrap();
    assert_eq!(listings[0]["title"], "Original");
}

#[tokio::test]
async fn deleting_someone_elses_listing_is_forbidden() {
    let server = TestServer::spawn().await;
    let (alice, bob) = two_clients(&server).await;

    let created: Value = alice
        .create_listing(&json!({"title": "Keep me", "url": "https://example.com"}))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let response = bob.delete_listing(id).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let listings: Value = alice.get_listings().await.json().await.unwrap();
    assert_eq!(listings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_and_unowned_listings_get_the_same_response() {
    let server = TestServer::spawn().await;
    let (alice, bob) = two_clients(&server).await;

    let created: Value = alice
        .create_listing(&json!({"title": "Mine", "url": "https://example.com"}))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let unowned = bob.delete_listing(id).await;
    let missing = bob.delete_listing(999_999).await;

    assert_eq!(unowned.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        unowned.text().await.unwrap(),
        missing.text().await.unwrap()
    );
}

#[tokio::test]
async fn contacts_are_scoped_to_their_owner() {
    let server = TestServer::spawn().await;
    let (alice, bob) = two_clients(&server).await;

    alice
        .create_contact(&json!({"name": "Alice's recruiter"}))
        .await;

    let bobs_contacts: Value = bob.get_contacts().await.json().await.unwrap();
    assert!(bobs_contacts.as_array().unwrap().is_empty());

    let alices_contacts: Value = alice.get_contacts().await.json().await.unwrap();
    assert_eq!(alices_contacts.as_array().unwrap().len(), 1);
}
