use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use models::bson::{doc, oid::ObjectId};
use serde_json::{json, Value};
use service::auth::TokenService;
use service::bookings::repository::mock::InMemoryBookingRepository;
use service::catalog::repository::mock::InMemoryCatalogRepository;
use tower::ServiceExt;

use server::routes::{self, auth::ServerState};

const SECRET: &str = "test-secret";

struct TestApp {
    router: Router,
    bookings: Arc<InMemoryBookingRepository>,
    tokens: TokenService,
    service_id: ObjectId,
}

fn build_app() -> TestApp {
    let service_id = ObjectId::new();
    let catalog = Arc::new(InMemoryCatalogRepository::with_documents(vec![doc! {
        "_id": service_id,
        "title": "Engine Oil Change",
        "img": "oil.jpg",
        "price": 20,
        "description": "full synthetic",
    }]));
    let bookings = Arc::new(InMemoryBookingRepository::default());
    let tokens = TokenService::new(SECRET, 3600);
    let state = ServerState::new(catalog, bookings.clone(), tokens.clone());
    let router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    TestApp { router, bookings, tokens, service_id }
}

async fn send(app: &TestApp, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.router.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn json_req(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

fn get_req(uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    Ok(builder.body(Body::empty())?)
}

fn unauthorized() -> Value {
    json!({"error": true, "message": "unauthorized access"})
}

#[tokio::test]
async fn root_returns_plain_text() -> anyhow::Result<()> {
    let app = build_app();
    let resp = app.router.clone().oneshot(get_req("/", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("");
    assert!(ct.starts_with("text/plain"));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], routes::ROOT_MESSAGE.as_bytes());
    Ok(())
}

#[tokio::test]
async fn jwt_endpoint_issues_verifiable_token() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, json_req("POST", "/jwt", json!({"email": "u@x.com"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token string");
    let claims = app.tokens.verify(token)?;
    assert_eq!(claims.email(), Some("u@x.com"));
    assert!(TokenService::new("other-secret", 3600).verify(token).is_err());
    Ok(())
}

#[tokio::test]
async fn jwt_rejects_non_object_body() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, json_req("POST", "/jwt", json!(["u@x.com"]))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));
    Ok(())
}

#[tokio::test]
async fn services_list_is_projected() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get_req("/services", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "_id": app.service_id.to_hex(), "title": "Engine Oil Change", "img": "oil.jpg", "price": 20 }])
    );
    Ok(())
}

#[tokio::test]
async fn service_detail_found_missing_and_malformed() -> anyhow::Result<()> {
    let app = build_app();

    let (status, body) = send(&app, get_req(&format!("/services/{}", app.service_id.to_hex()), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], json!("full synthetic"));

    let (status, body) = send(&app, get_req(&format!("/services/{}", ObjectId::new().to_hex()), None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, get_req("/services/not-an-id", None)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": true, "message": "invalid id: not-an-id"}));
    Ok(())
}

#[tokio::test]
async fn add_service_then_list_contains_it() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(
        &app,
        json_req("POST", "/addService", json!({"title": "Wheel Alignment", "img": "w.jpg", "price": 55}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], json!(true));
    let new_id = body["insertedId"].as_str().expect("inserted id").to_string();

    let (_, list) = send(&app, get_req("/services", None)?).await?;
    let ids: Vec<&str> = list.as_array().unwrap().iter().filter_map(|s| s["_id"].as_str()).collect();
    assert!(ids.contains(&new_id.as_str()));
    Ok(())
}

#[tokio::test]
async fn booking_creation_forces_pending() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(
        &app,
        json_req("POST", "/bookings", json!({"email": "a@x.com", "service": "oil-change", "status": "approved"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let id = ObjectId::parse_str(body["insertedId"].as_str().unwrap())?;
    let stored = app.bookings.get(id).await.expect("stored booking");
    assert_eq!(stored.get_str("status")?, "pending");
    assert_eq!(stored.get_str("service")?, "oil-change");
    Ok(())
}

#[tokio::test]
async fn bookings_list_requires_token() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, get_req("/bookings?email=a@x.com", None)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized());

    let (status, body) = send(&app, get_req("/bookings?email=a@x.com", Some("garbage"))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized());
    Ok(())
}

#[tokio::test]
async fn bookings_list_rejects_other_owner() -> anyhow::Result<()> {
    let app = build_app();
    let token = app.tokens.issue(json!({"email": "a@x.com"}))?;

    let (status, body) = send(&app, get_req("/bookings?email=b@x.com", Some(&token))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized());

    // Omitting the query parameter does not bypass the owner check.
    let (status, _) = send(&app, get_req("/bookings", Some(&token))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bookings_list_returns_only_owner_documents() -> anyhow::Result<()> {
    let app = build_app();
    for email in ["a@x.com", "b@x.com", "a@x.com"] {
        send(&app, json_req("POST", "/bookings", json!({"email": email, "service": "wash"}))?).await?;
    }
    let token = app.tokens.issue(json!({"email": "a@x.com"}))?;
    let (status, body) = send(&app, get_req("/bookings?email=a@x.com", Some(&token))?).await?;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|b| b["email"] == json!("a@x.com")));

    let (status, all) = send(&app, get_req("/allOrders", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let issued = chrono::Utc::now().timestamp() - 3601;
    let token = app.tokens.issue_at(json!({"email": "a@x.com"}), issued)?;
    let (status, body) = send(&app, get_req("/bookings?email=a@x.com", Some(&token))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized());
    Ok(())
}

#[tokio::test]
async fn patch_missing_booking_upserts() -> anyhow::Result<()> {
    let app = build_app();
    let id = ObjectId::new();
    let (status, body) = send(
        &app,
        json_req("PATCH", &format!("/bookings/{}", id.to_hex()), json!({"status": "approved"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], json!(0));
    assert_eq!(body["upsertedCount"], json!(1));
    assert_eq!(body["upsertedId"], json!(id.to_hex()));

    let created = app.bookings.get(id).await.expect("upserted document");
    assert_eq!(created.keys().count(), 2);
    assert_eq!(created.get_str("status")?, "approved");
    Ok(())
}

#[tokio::test]
async fn patch_existing_booking_updates_status() -> anyhow::Result<()> {
    let app = build_app();
    let (_, created) = send(&app, json_req("POST", "/bookings", json!({"email": "a@x.com"}))?).await?;
    let raw = created["insertedId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, json_req("PATCH", &format!("/bookings/{raw}"), json!({"status": "done"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], json!(1));
    assert_eq!(body["upsertedId"], Value::Null);
    let stored = app.bookings.get(ObjectId::parse_str(&raw)?).await.unwrap();
    assert_eq!(stored.get_str("status")?, "done");
    Ok(())
}

#[tokio::test]
async fn delete_booking_reports_count() -> anyhow::Result<()> {
    let app = build_app();
    let (_, created) = send(&app, json_req("POST", "/bookings", json!({"email": "a@x.com"}))?).await?;
    let raw = created["insertedId"].as_str().unwrap().to_string();

    let delete = |id: String| {
        Request::builder().method("DELETE").uri(format!("/bookings/{id}")).body(Body::empty())
    };
    let (status, body) = send(&app, delete(raw.clone())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"acknowledged": true, "deletedCount": 1}));

    let (status, body) = send(&app, delete(raw)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], json!(0));

    let (status, body) = send(&app, delete("xyz".into())?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_gets_error_envelope() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/bookings")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));
    assert_eq!(app.bookings.len().await, 0);
    Ok(())
}

#[tokio::test]
async fn jwt_with_audience_claim_still_opens_owner_bookings() -> anyhow::Result<()> {
    let app = build_app();
    send(&app, json_req("POST", "/bookings", json!({"email": "u@x.com", "service": "wash"}))?).await?;

    let (status, body) =
        send(&app, json_req("POST", "/jwt", json!({"email": "u@x.com", "aud": "car-doctor"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token string").to_string();

    let (status, body) = send(&app, get_req("/bookings?email=u@x.com", Some(&token))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn token_without_email_lists_everything_only_without_query() -> anyhow::Result<()> {
    let app = build_app();
    for email in ["a@x.com", "b@x.com"] {
        send(&app, json_req("POST", "/bookings", json!({"email": email}))?).await?;
    }
    let token = app.tokens.issue(json!({"name": "anon"}))?;

    let (status, body) = send(&app, get_req("/bookings", Some(&token))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, body) = send(&app, get_req("/bookings?email=a@x.com", Some(&token))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, unauthorized());
    Ok(())
}

#[tokio::test]
async fn repeated_email_query_gets_error_envelope() -> anyhow::Result<()> {
    let app = build_app();
    let token = app.tokens.issue(json!({"email": "a@x.com"}))?;
    let (status, body) =
        send(&app, get_req("/bookings?email=a@x.com&email=b@x.com", Some(&token))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));
    assert!(body["message"].is_string());
    Ok(())
}
