//! HTTP route handlers for the API

use super::validation::{validate, NewItem};
use super::AppState;
use crate::store::Item;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "items": state.store.len()
    }))
}

// ============================================================================
// Items
// ============================================================================

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let violations = validate(&payload);
    if !violations.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "validation failed",
                "violations": violations
            })),
        )
            .into_response();
    }

    let item = state.store.save(Item {
        id: payload.id.unwrap_or_default(),
        name: payload.name,
        price: payload.price,
        description: payload.description,
        created_at: chrono::Utc::now().to_rfc3339(),
    });

    tracing::debug!("Created item {}", item.id);
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get(&id) {
        Some(item) => Json(item).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.list())
}
