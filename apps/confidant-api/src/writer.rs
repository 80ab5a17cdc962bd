//! Write service: contact creation and memory edits.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use confidant_model::{Record, RecordFields, RecordKind, RecordStore, ValidationError};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{ApiError, ApiResult, AppState};

pub const SERVICE: &str = "confidant-writer";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/contacts/{kind}", post(create_contact))
        .route("/contacts/{kind}/{name}/memories", post(append_memory))
        .route(
            "/contacts/{kind}/{name}/memories/{index}",
            put(replace_memory),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CreateContactRequest {
    name: Option<String>,
    birthday: Option<String>,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    memories: Vec<String>,
    #[serde(default)]
    anecdotes: Vec<String>,
    trust_level: Option<i64>,
}

impl CreateContactRequest {
    fn fields(&mut self) -> RecordFields {
        RecordFields::new(
            self.name.take().unwrap_or_default(),
            self.birthday.take().unwrap_or_default(),
        )
        .interests(std::mem::take(&mut self.interests))
        .memories(std::mem::take(&mut self.memories))
        .anecdotes(std::mem::take(&mut self.anecdotes))
    }
}

#[derive(Debug, Deserialize)]
struct MemoryRequest {
    memory: Option<String>,
}

impl MemoryRequest {
    fn into_text(self) -> ApiResult<String> {
        self.memory
            .ok_or_else(|| ApiError::bad_request("missing required field: memory"))
    }
}

async fn index() -> Json<Value> {
    Json(json!({
        "service": SERVICE,
        "description": "Create contacts and record their memories",
        "endpoints": [
            "POST /contacts/{kind}",
            "POST /contacts/{kind}/{name}/memories",
            "PUT /contacts/{kind}/{name}/memories/{index}"
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

async fn create_contact(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Path(kind) = path?;
    let kind = parse_kind(&kind)?;
    let Json(mut request) = payload?;
    let record = match kind {
        RecordKind::Basic => Record::basic(request.fields())?,
        RecordKind::Trusted => {
            let trust_level = request
                .trust_level
                .ok_or(ValidationError::MissingField("trustLevel"))?;
            Record::trusted(request.fields(), trust_level)?
        }
    };
    let name = record.name().to_owned();
    let trust_level = record.trust_level().map(|level| level.get());

    state
        .directory
        .update(|store| {
            store.add(record);
            Ok::<_, ApiError>(())
        })
        .await?;
    info!(%name, %kind, ?trust_level, "contact created");

    let mut body = json!({
        "success": true,
        "message": format!("{kind} contact created"),
        "name": name,
        "kind": kind
    });
    if let Some(level) = trust_level {
        body["trustLevel"] = json!(level);
    }
    Ok((StatusCode::CREATED, Json(body)))
}

async fn append_memory(
    path: Result<Path<(String, String)>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<MemoryRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Path((kind, name)) = path?;
    let expected = parse_kind(&kind)?;
    let Json(request) = payload?;
    let text = request.into_text()?;

    let confirmation = state
        .directory
        .update(|store| {
            let record = find_of_kind(store, &name, expected)?;
            Ok::<_, ApiError>(record.append_memory(text))
        })
        .await?;
    info!(%name, kind = %expected, "memory appended");

    Ok(Json(json!({
        "success": true,
        "message": "Memory added",
        "name": name,
        "result": confirmation
    })))
}

async fn replace_memory(
    path: Result<Path<(String, String, usize)>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<MemoryRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Path((kind, name, index)) = path?;
    let expected = parse_kind(&kind)?;
    let Json(request) = payload?;
    let text = request.into_text()?;

    let confirmation = state
        .directory
        .update(|store| {
            let record = find_of_kind(store, &name, expected)?;
            Ok::<_, ApiError>(record.memories_mut().replace(index, text)?)
        })
        .await?;
    info!(%name, kind = %expected, index, "memory replaced");

    Ok(Json(json!({
        "success": true,
        "message": "Memory updated",
        "name": name,
        "result": confirmation
    })))
}

fn find_of_kind<'a>(
    store: &'a mut RecordStore,
    name: &str,
    expected: RecordKind,
) -> ApiResult<&'a mut Record> {
    let record = store
        .find_by_name_mut(name)
        .ok_or_else(|| ApiError::no_contact(name))?;
    if record.kind() != expected {
        return Err(ApiError::bad_request(format!(
            "contact '{name}' is {}, not {expected}",
            record.kind()
        )));
    }
    Ok(record)
}

fn parse_kind(raw: &str) -> ApiResult<RecordKind> {
    match raw {
        "basic" => Ok(RecordKind::Basic),
        "trusted" => Ok(RecordKind::Trusted),
        other => Err(ApiError::not_found(format!("unknown contact kind: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::http::{Method, StatusCode};
    use confidant_store::{Directory, InMemorySnapshotStore, SnapshotStore};
    use serde_json::json;

    use super::{parse_kind, router};
    use crate::AppState;
    use crate::test_support::call;

    fn app() -> (Router, Arc<InMemorySnapshotStore>) {
        let snapshots = Arc::new(InMemorySnapshotStore::new());
        let state = AppState::new(Directory::new(snapshots.clone()));
        (router(state), snapshots)
    }

    async fn create_carlos(app: &Router) {
        let (status, _) = call(
            app,
            Method::POST,
            "/contacts/basic",
            Some(json!({
                "name": "Carlos",
                "birthday": "10/06/1995",
                "interests": ["deportes"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_basic_persists_record() {
        let (app, snapshots) = app();
        create_carlos(&app).await;

        let store = snapshots.load().await;
        let carlos = store.find_by_name("Carlos").unwrap();
        assert_eq!(carlos.birthday(), "10/06/1995");
        assert_eq!(carlos.interests(), ["deportes"]);
    }

    #[tokio::test]
    async fn create_basic_requires_name_and_birthday() {
        let (app, snapshots) = app();

        let (status, body) = call(
            &app,
            Method::POST,
            "/contacts/basic",
            Some(json!({ "birthday": "10/06/1995" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "missing required field: name");

        let (status, _) = call(
            &app,
            Method::POST,
            "/contacts/basic",
            Some(json!({ "name": "Carlos" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(snapshots.document().is_none());
    }

    #[tokio::test]
    async fn create_trusted_rejects_out_of_range_level() {
        let (app, snapshots) = app();

        let (status, body) = call(
            &app,
            Method::POST,
            "/contacts/trusted",
            Some(json!({ "name": "Juan", "birthday": "15/03/1995", "trustLevel": 11 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "trust level must be between 1 and 10, got 11");
        assert!(snapshots.load().await.is_empty());
    }

    #[tokio::test]
    async fn create_trusted_requires_level() {
        let (app, _) = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/contacts/trusted",
            Some(json!({ "name": "Juan", "birthday": "15/03/1995" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing required field: trustLevel");
    }

    #[tokio::test]
    async fn create_trusted_returns_level() {
        let (app, _) = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/contacts/trusted",
            Some(json!({ "name": "Juan", "birthday": "15/03/1995", "trustLevel": 8 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["kind"], "Trusted");
        assert_eq!(body["trustLevel"], 8);
    }

    #[tokio::test]
    async fn append_memory_tags_and_saves() {
        let (app, snapshots) = app();
        create_carlos(&app).await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/contacts/basic/Carlos/memories",
            Some(json!({ "memory": "Fuimos al cine" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Memory added: Fuimos al cine");
        let store = snapshots.load().await;
        assert_eq!(
            store.find_by_name("Carlos").unwrap().memories().entries(),
            ["[Basic] Fuimos al cine"]
        );
    }

    #[tokio::test]
    async fn append_memory_reports_missing_contact_and_kind_mismatch() {
        let (app, _) = app();
        create_carlos(&app).await;

        let (status, _) = call(
            &app,
            Method::POST,
            "/contacts/basic/Nadie/memories",
            Some(json!({ "memory": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(
            &app,
            Method::POST,
            "/contacts/trusted/Carlos/memories",
            Some(json!({ "memory": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "contact 'Carlos' is Basic, not Trusted");

        let (status, _) = call(
            &app,
            Method::POST,
            "/contacts/basic/Carlos/memories",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn replace_memory_out_of_range_keeps_entries() {
        let (app, snapshots) = app();
        create_carlos(&app).await;
        for memory in ["uno", "dos"] {
            call(
                &app,
                Method::POST,
                "/contacts/basic/Carlos/memories",
                Some(json!({ "memory": memory })),
            )
            .await;
        }
        let before = snapshots.document();

        let (status, body) = call(
            &app,
            Method::PUT,
            "/contacts/basic/Carlos/memories/5",
            Some(json!({ "memory": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid memory index 5: log holds 2 entries");
        assert_eq!(snapshots.document(), before);

        let (status, body) = call(
            &app,
            Method::PUT,
            "/contacts/basic/Carlos/memories/1",
            Some(json!({ "memory": "tres" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Memory changed from '[Basic] dos' to 'tres'");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_as_json_error() {
        let (app, _) = app();
        let (status, body) =
            call(&app, Method::POST, "/contacts/basic", Some(json!([1, 2]))).await;
        assert!(status.is_client_error());
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unparseable_memory_index_uses_error_envelope() {
        let (app, snapshots) = app();
        create_carlos(&app).await;
        let before = snapshots.document();

        let (status, body) = call(
            &app,
            Method::PUT,
            "/contacts/basic/Carlos/memories/-1",
            Some(json!({ "memory": "x" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));
        assert_eq!(snapshots.document(), before);
    }

    #[test]
    fn parse_kind_accepts_known_kinds_only() {
        assert!(parse_kind("basic").is_ok());
        assert!(parse_kind("trusted").is_ok());
        assert_eq!(
            parse_kind("close").unwrap_err().status(),
            StatusCode::NOT_FOUND
        );
    }
}
