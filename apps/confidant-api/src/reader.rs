//! Read service: listings, lookups, memory summaries and statistics.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use confidant_model::NotificationStyle;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::views::{ContactDetail, ContactView};
use crate::{ApiError, ApiResult, AppState};

pub const SERVICE: &str = "confidant-reader";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/contacts", get(list_contacts))
        .route("/contacts/{name}/memories", get(contact_memories))
        .route("/contacts/{name}/notification", get(contact_notification))
        .route("/stats", get(stats))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize, Default)]
struct ContactQuery {
    name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct NotificationQuery {
    style: Option<NotificationStyle>,
}

async fn index() -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "description": "Browse contacts and their memories",
        "endpoints": [
            "GET /contacts",
            "GET /contacts?name={name}",
            "GET /contacts/{name}/memories",
            "GET /contacts/{name}/notification",
            "GET /stats"
        ]
    }))
}

async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE,
        "snapshotReadFaults": state.directory.read_faults()
    }))
}

async fn list_contacts(
    query: Result<Query<ContactQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    let store = state.directory.current_store().await;

    if let Some(name) = query.name.filter(|name| !name.is_empty()) {
        let record = store
            .find_by_name(&name)
            .ok_or_else(|| ApiError::no_contact(&name))?;
        return Ok(Json(json!(ContactDetail::from(record))));
    }

    let contacts: Vec<ContactView> = store.all().iter().map(ContactView::from).collect();
    let mut body = json!({
        "success": true,
        "total": contacts.len(),
        "contacts": contacts
    });
    if store.is_empty() {
        body["message"] = json!("No contacts registered");
    }
    Ok(Json(body))
}

async fn contact_memories(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let Path(name) = path?;
    let store = state.directory.current_store().await;
    let record = store
        .find_by_name(&name)
        .ok_or_else(|| ApiError::no_contact(&name))?;
    let memories = record.memories();

    Ok(Json(json!({
        "success": true,
        "name": record.name(),
        "kind": record.kind(),
        "memories": memories.entries(),
        "rendered": memories.render(),
        "count": memories.count(),
        "summary": memories.summary(),
        "savedNotice": memories.saved_notice()
    })))
}

async fn contact_notification(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<NotificationQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let Path(name) = path?;
    let Query(query) = query?;
    let store = state.directory.current_store().await;
    let record = store
        .find_by_name(&name)
        .ok_or_else(|| ApiError::no_contact(&name))?;
    let style = query.style.unwrap_or(state.style);

    let mut body = json!({
        "success": true,
        "name": record.name(),
        "notification": record.notification_text(),
        "reminder": style.format(record),
        "style": style
    });
    if let Some(moments) = record.shared_moments() {
        body["sharedMoments"] = json!(moments);
    }
    Ok(Json(body))
}

async fn stats(State(state): State<AppState>) -> Json<Value> {
    let store = state.directory.current_store().await;
    let counts = store.count_by_variant();

    Json(json!({
        "success": true,
        "total": store.count(),
        "basic": counts.basic,
        "trusted": counts.trusted
    }))
}
