#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use plantdx_core::confidence::ConfidencePolicy;
use plantdx_core::query::{DiseaseSearch, PlantTypeMatch};
use plantdx_db::models::disease::{DiseaseRecord, NewDisease};
use plantdx_db::repositories::{DiseaseStore, InMemoryDiseaseRepo};
use plantdx_db::DbError;
use serde_json::Value;
use tower::ServiceExt;

use plantdx_api::config::{CorsOrigins, DatabaseConfig, LogFormat, ServerConfig, StoreBackend};
use plantdx_api::router::build_app_router;
use plantdx_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the given policy.
pub fn test_config(confidence_policy: ConfidencePolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec!["http://localhost:5173".parse().unwrap()]),
        request_timeout_secs: 30,
        confidence_policy,
        store_backend: StoreBackend::Memory,
        log_format: LogFormat::Text,
        database: DatabaseConfig {
            uri: None,
            user: None,
            password: None,
            cluster: "localhost".to_string(),
            app_name: "test".to_string(),
            name: "plantdx_test".to_string(),
            collection: "diseases".to_string(),
        },
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given store.
pub fn build_test_app_with(store: Arc<dyn DiseaseStore>, policy: ConfidencePolicy) -> Router {
    build_app_router(AppState::new(store, test_config(policy)))
}

/// Router over `store` with the default (preserve) confidence policy.
pub fn build_test_app(store: Arc<InMemoryDiseaseRepo>) -> Router {
    build_test_app_with(store, ConfidencePolicy::Preserve)
}

/// Router whose store was never initialized.
pub fn build_unready_app() -> Router {
    build_app_router(AppState {
        store: None,
        config: Arc::new(test_config(ConfidencePolicy::Preserve)),
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A store whose every operation fails the way a dropped connection would.
pub struct FailingStore;

pub const FAILING_STORE_ERROR: &str = "connection reset by peer";

#[async_trait]
impl DiseaseStore for FailingStore {
    async fn insert_one(&self, _disease: NewDisease) -> Result<DiseaseRecord, DbError> {
        Err(DbError::Backend(FAILING_STORE_ERROR.into()))
    }

    async fn insert_many(&self, _diseases: Vec<NewDisease>) -> Result<Vec<ObjectId>, DbError> {
        Err(DbError::Backend(FAILING_STORE_ERROR.into()))
    }

    async fn find_all(&self) -> Result<Vec<DiseaseRecord>, DbError> {
        Err(DbError::Backend(FAILING_STORE_ERROR.into()))
    }

    async fn find_by_plant_type(
        &self,
        _filter: &PlantTypeMatch,
    ) -> Result<Vec<DiseaseRecord>, DbError> {
        Err(DbError::Backend(FAILING_STORE_ERROR.into()))
    }

    async fn search(&self, _search: &DiseaseSearch) -> Result<Vec<DiseaseRecord>, DbError> {
        Err(DbError::Backend(FAILING_STORE_ERROR.into()))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Err(DbError::Backend(FAILING_STORE_ERROR.into()))
    }
}
