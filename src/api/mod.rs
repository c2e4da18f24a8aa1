//! HTTP API module for Itemd
//!
//! Provides the REST endpoints for creating, fetching, and listing items.

pub mod routes;
pub mod validation;

use crate::error::Result;
use crate::store::ItemStore;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// The process-wide item store, constructed at the composition root
    pub store: Arc<ItemStore>,
}

/// Start the HTTP API server
pub async fn serve(addr: SocketAddr, store: Arc<ItemStore>) -> Result<()> {
    let state = AppState { store };
    let app = create_router(state);

    // Check if port is already in use (another itemd instance running)
    if tokio::net::TcpStream::connect(addr).await.is_ok() {
        tracing::error!(
            "Port {} is already in use — another itemd instance may be running. \
             Use `curl http://{}/health` to check.",
            addr.port(),
            addr
        );
        return Err(crate::error::ItemdError::Api(format!(
            "Port {} already in use",
            addr.port()
        )));
    }

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::error::ItemdError::Api(e.to_string()))?;

    Ok(())
}

/// Create the API router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/items", post(routes::create_item))
        .route("/items", get(routes::list_items))
        .route("/items/:id", get(routes::get_item))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Item;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<ItemStore>) {
        let store = Arc::new(ItemStore::new());
        let app = create_router(AppState {
            store: store.clone(),
        });
        (app, store)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_item_returns_201_with_generated_id() {
        let (app, store) = test_app();

        let response = app
            .oneshot(post_json(r#"{"name":"widget","price":9.99}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        let id = body["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(body["name"], "widget");
        assert_eq!(store.get(id).unwrap().name, "widget");
    }

    #[tokio::test]
    async fn test_create_item_keeps_client_id() {
        let (app, store) = test_app();

        let response = app
            .oneshot(post_json(r#"{"id":"item-1","name":"widget","price":1.5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["id"], "item-1");
        assert!(store.get("item-1").is_some());
    }

    #[tokio::test]
    async fn test_create_item_validation_failure_is_400() {
        let (app, store) = test_app();

        let response = app
            .oneshot(post_json(r#"{"name":"","price":-1.0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"], "validation failed");
        assert_eq!(body["violations"].as_array().unwrap().len(), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_item_malformed_json_is_400() {
        let (app, store) = test_app();

        let response = app.oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let (app, store) = test_app();
        store.save(Item {
            id: "item-1".to_string(),
            name: "widget".to_string(),
            price: 9.99,
            description: Some("a widget".to_string()),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/items/item-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["id"], "item-1");
        assert_eq!(body["price"], 9.99);
        assert_eq!(body["description"], "a widget");
    }

    #[tokio::test]
    async fn test_get_item_missing_is_404_with_empty_body() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/items/doesnotexist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_items_returns_all() {
        let (app, store) = test_app();
        for i in 0..3 {
            store.save(Item {
                id: format!("item-{}", i),
                name: format!("widget-{}", i),
                price: 1.0,
                description: None,
                created_at: "2024-01-01T00:00:00Z".to_string(),
            });
        }

        let response = app
            .oneshot(Request::builder().uri("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["items"], 0);
    }
}
