//! Shared test fixtures: the whole backend wired in-process.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cm_01_record_store::{InMemoryRecordStore, RecordStore};
use cm_02_naming_workflow::{NamingService, NamingWorkflowApi, WorkflowAction};
use cm_03_cat_registry::{CatRegistryApi, CatRegistryService, NewCat, NoopNotifier};
use cm_04_api_gateway::{build_router, ApiKeyGate, AppState, GatewayConfig};
use serde_json::Value;
use shared_types::{Cat, NameSuggestion};
use std::sync::Arc;
use tower::ServiceExt;

/// Moderator key accepted by every [`Stack`].
pub const ADMIN_KEY: &str = "integration-moderator";

/// Store, services and router sharing one record store.
pub struct Stack {
    pub store: Arc<dyn RecordStore>,
    pub naming: Arc<NamingService>,
    pub registry: Arc<CatRegistryService>,
    pub router: Router,
}

impl Stack {
    pub fn in_memory() -> Self {
        Self::on_store(Arc::new(InMemoryRecordStore::new()))
    }

    pub fn on_store(store: Arc<dyn RecordStore>) -> Self {
        let naming = Arc::new(NamingService::new(Arc::clone(&store)));
        let registry = Arc::new(CatRegistryService::new(
            Arc::clone(&store),
            Arc::new(NoopNotifier),
        ));
        let gate = ApiKeyGate::new(ADMIN_KEY).expect("non-blank key");
        let router = build_router(
            AppState {
                naming: naming.clone(),
                registry: registry.clone(),
                gate: Arc::new(gate),
            },
            &GatewayConfig::default(),
        );
        Self {
            store,
            naming,
            registry,
            router,
        }
    }

    /// An approved cat straight from the registry.
    pub fn approved_cat(&self, location: &str) -> Cat {
        self.registry
            .create_cat(NewCat {
                primary_photo: Some(format!("/uploads/{}.jpg", location.to_lowercase())),
                location_lat: Some(35.9),
                location_lng: Some(14.5),
                location_name: Some(location.to_string()),
                color: Some("tabby".to_string()),
                approved: Some(true),
                ..NewCat::default()
            })
            .expect("valid cat")
    }

    /// A cat in `voting` with the given names suggested, in order.
    pub fn cat_in_voting(&self, location: &str, names: &[&str]) -> (Cat, Vec<NameSuggestion>) {
        let cat = self.approved_cat(location);
        self.naming
            .apply_workflow_action(cat.id, WorkflowAction::StartSuggesting)
            .expect("start suggesting");
        let suggestions = names
            .iter()
            .map(|name| {
                self.naming
                    .submit_suggestion(cat.id, name)
                    .expect("valid suggestion")
            })
            .collect();
        let cat = self
            .naming
            .apply_workflow_action(cat.id, WorkflowAction::StartVoting)
            .expect("start voting");
        (cat, suggestions)
    }

    /// Send one request through the router and decode the JSON body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn as_admin(mut request: Request<Body>) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", ADMIN_KEY).parse().expect("header"),
    );
    request
}

/// A vote request arriving from `ip` through a proxy.
pub fn vote_from(ip: &str, suggestion: &NameSuggestion) -> Request<Body> {
    let mut request = post_json(
        "/api/votes",
        &serde_json::json!({ "suggestion_id": suggestion.id.to_string() }),
    );
    request
        .headers_mut()
        .insert("x-forwarded-for", ip.parse().expect("header"));
    request
}
