//! Health reporting and store-outage behaviour over HTTP

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use serde_json::{json, Value};

use otp_api::{create_app, AppState};
use otp_core::{
    NoOpAuditSink, OsRngCodeGenerator, OtpLifecycleManager, OtpPolicy, StoreError, TtlStore,
};
use otp_infra::InMemoryTtlStore;
use otp_shared::ServerConfig;

/// Store whose backend is unreachable
struct UnreachableStore;

fn refused() -> StoreError {
    StoreError::backend("connection refused")
}

#[async_trait]
impl TtlStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(refused())
    }

    async fn get_string(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(refused())
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn set_string(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(refused())
    }
}

fn state_with<S: TtlStore>(store: S) -> web::Data<AppState<S, OsRngCodeGenerator, NoOpAuditSink>> {
    let manager = Arc::new(OtpLifecycleManager::new(
        Arc::new(store),
        Arc::new(OsRngCodeGenerator),
        Arc::new(NoOpAuditSink),
        OtpPolicy::default(),
    ));
    web::Data::new(AppState::new(manager, ServerConfig::default()))
}

#[actix_web::test]
async fn test_health_with_memory_store() {
    let app = test::init_service(create_app(state_with(InMemoryTtlStore::new()))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["store"]["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_health_reports_unreachable_store() {
    let app = test::init_service(create_app(state_with(UnreachableStore))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["api"]["status"], "healthy");
    assert!(body["services"]["store"]["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[actix_web::test]
async fn test_request_during_outage_is_503() {
    let app = test::init_service(create_app(state_with(UnreachableStore))).await;

    let req = test::TestRequest::post()
        .uri("/api/otp/request")
        .set_json(json!({ "phoneNumber": "09123456789" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "transient_failure");
    assert_eq!(body["data"]["message"], "An error occurred. Please try again.");
}

#[actix_web::test]
async fn test_invalid_phone_during_outage_is_still_400() {
    let app = test::init_service(create_app(state_with(UnreachableStore))).await;

    let req = test::TestRequest::post()
        .uri("/api/otp/request")
        .set_json(json!({ "phoneNumber": "+989123456789" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_verify_during_outage_is_false() {
    let app = test::init_service(create_app(state_with(UnreachableStore))).await;

    let req = test::TestRequest::post()
        .uri("/api/otp/verify")
        .set_json(json!({ "phoneNumber": "09123456789", "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], false);
}
