//! Listing lifecycle against a running server.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use lunnar_integration_tests::{TestContext, listing_body};
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health() {
    let ctx = TestContext::new();
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_new_listing_is_pending_until_approved() {
    let ctx = TestContext::new();

    let mut body = listing_body("Toyota", "Corolla");
    body["status"] = json!("approved");
    let resp = ctx
        .client
        .post(ctx.url("/api/ads"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    let public: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/ads"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.iter().all(|ad| ad["id"] != id.as_str()));

    let resp = ctx
        .admin(ctx.client.patch(ctx.url(&format!("/api/admin/ads/{id}"))))
        .json(&json!({"status": "approved"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let public: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/ads"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.iter().any(|ad| ad["id"] == id.as_str()));

    let resp = ctx
        .admin(ctx.client.delete(ctx.url(&format!("/api/admin/ads/{id}"))))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let deleted: Value = resp.json().await.unwrap();
    assert_eq!(deleted["message"], "Listing deleted");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_listing_without_images_is_rejected() {
    let ctx = TestContext::new();
    let mut body = listing_body("Opel", "Astra");
    body["images"] = json!([]);

    let resp = ctx
        .client
        .post(ctx.url("/api/ads"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let error: Value = resp.json().await.unwrap();
    assert!(error["message"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_unknown_listing_status_update_is_not_found() {
    let ctx = TestContext::new();
    let resp = ctx
        .admin(ctx.client.patch(ctx.url("/api/admin/ads/does-not-exist")))
        .json(&json!({"status": "rejected"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
