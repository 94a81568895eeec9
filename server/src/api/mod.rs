//! HTTP API
//!
//! Everything under `/api` except login and logout sits behind the session
//! guard.

mod auth_api;
mod item_api;
mod store_api;
mod suggestion_api;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::auth::require_session;
use crate::error::ApiError;
use crate::AppState;

/// The `/api` tree
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(auth_api::session_status))
        .route("/items", get(item_api::list_items).post(item_api::create_item))
        .route("/items/reorder", post(item_api::reorder_items))
        .route("/items/:id", patch(item_api::update_item).delete(item_api::delete_item))
        .route("/stores", get(store_api::list_stores).post(store_api::create_store))
        .route("/stores/:id", patch(store_api::update_store).delete(store_api::delete_store))
        .route("/suggestions", get(suggestion_api::list_suggestions))
        .route("/suggestions/:content", axum::routing::delete(suggestion_api::delete_suggestion))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    let public = Router::new()
        .route("/login", post(auth_api::login))
        .route("/logout", post(auth_api::logout));

    Router::new().nest(
        "/api",
        public
            .merge(protected)
            .fallback(|| async { ApiError::NotFound("No such endpoint".to_string()) }),
    )
}
