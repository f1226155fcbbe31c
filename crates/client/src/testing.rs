//! Test fixtures: sample listings and an in-process stub of the REST API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use lunnar_core::{
    FavoriteSet, FuelType, Listing, ListingId, ModerationStatus, Price, Transmission,
};

use crate::api::ApiClient;
use crate::config::ClientConfig;

/// Password the stub accepts for any login.
pub const STUB_PASSWORD: &str = "Secret1";

/// An approved petrol listing with the given id.
pub fn listing(id: &str, brand: &str, model: &str) -> Listing {
    Listing {
        id: ListingId::new(id),
        brand: brand.to_string(),
        model: model.to_string(),
        year: 2019,
        odometer_km: 80_000,
        fuel: FuelType::Petrol,
        transmission: Transmission::Manual,
        horsepower: 122,
        displacement_ccm: Some(1600),
        price: Price::new(8_000_000),
        city: "Budapest".to_string(),
        images: vec!["https://img.example/1.jpg".to_string()],
        description: String::new(),
        phone: None,
        email: None,
        status: ModerationStatus::Approved,
        created_at: Utc.timestamp_opt(1_714_557_600, 0).single().unwrap_or_default(),
        owner_id: None,
        owner_email: None,
    }
}

/// A client pointed at a port nothing listens on.
pub fn offline_api() -> ApiClient {
    ApiClient::new(&offline_config())
}

pub fn offline_config() -> ClientConfig {
    ClientConfig::new("http://127.0.0.1:1/api", ".lunnar", None)
}

/// What the stub server saw.
#[derive(Default)]
pub struct StubLog {
    pub ads: Mutex<Vec<Listing>>,
    pub submitted: Mutex<Vec<Listing>>,
    pub registered: Mutex<Vec<String>>,
    pub synced: Mutex<Vec<FavoriteSet>>,
    pub deleted: Mutex<Vec<String>>,
}

/// Start a stub API serving `ads` and return a client for it.
pub async fn stub_api(ads: Vec<Listing>) -> ApiClient {
    stub_server(ads).await.0
}

/// Start a stub API and return both the client and the request log.
pub async fn stub_server(ads: Vec<Listing>) -> (ApiClient, Arc<StubLog>) {
    let (config, log) = stub_config(ads).await;
    (ApiClient::new(&config), log)
}

/// Start a stub API and return a configuration pointed at it.
pub async fn stub_config(ads: Vec<Listing>) -> (ClientConfig, Arc<StubLog>) {
    let log = Arc::new(StubLog::default());
    if let Ok(mut stored) = log.ads.lock() {
        *stored = ads;
    }

    let app = Router::new()
        .route("/api/ads", get(list_ads).post(create_ad))
        .route("/api/user/ads", get(list_ads))
        .route("/api/admin/ads", get(list_ads))
        .route("/api/admin/ads/{id}", patch(update_ad).delete(delete_ad))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/user/favorites", post(favorites))
        .with_state(Arc::clone(&log));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("bind stub: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("stub addr: {e}"));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let config = ClientConfig::new(format!("http://{addr}/api"), ".lunnar", None);
    (config, log)
}

type Log = State<Arc<StubLog>>;

async fn list_ads(State(log): Log) -> Json<Vec<Listing>> {
    Json(log.ads.lock().map(|ads| ads.clone()).unwrap_or_default())
}

async fn create_ad(
    State(log): Log,
    Json(mut listing): Json<Listing>,
) -> (StatusCode, Json<Listing>) {
    if let Ok(mut submitted) = log.submitted.lock() {
        submitted.push(listing.clone());
    }
    listing.id = ListingId::new("srv-1");
    listing.status = ModerationStatus::Pending;
    (StatusCode::CREATED, Json(listing))
}

async fn update_ad(
    State(log): Log,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Listing>, (StatusCode, Json<Value>)> {
    let status: ModerationStatus = serde_json::from_value(body["status"].clone())
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(json!({"message": "bad status"}))))?;
    let found = log.ads.lock().ok().and_then(|mut ads| {
        ads.iter_mut().find(|l| l.id.as_str() == id).map(|l| {
            l.status = status;
            l.clone()
        })
    });
    found
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))))
}

async fn delete_ad(State(log): Log, Path(id): Path<String>) -> Json<Value> {
    if let Ok(mut deleted) = log.deleted.lock() {
        deleted.push(id);
    }
    Json(json!({"message": "Listing deleted"}))
}

async fn register(State(log): Log, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if let Ok(mut registered) = log.registered.lock() {
        registered.push(body["username"].as_str().unwrap_or_default().to_string());
    }
    (StatusCode::CREATED, Json(json!({"message": "Registration successful"})))
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["password"] != STUB_PASSWORD {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        ));
    }
    Ok(Json(json!({
        "token": "srv-token",
        "username": "anna",
        "favorites": ["r-9"],
        "id": "srv-user",
        "email": body["email"],
    })))
}

async fn favorites(State(log): Log, Json(body): Json<Value>) -> Json<Value> {
    let set: FavoriteSet = serde_json::from_value(body["favorites"].clone()).unwrap_or_default();
    if let Ok(mut synced) = log.synced.lock() {
        synced.push(set);
    }
    Json(body)
}
