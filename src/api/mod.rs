pub mod envelope;
pub mod form;
pub mod health;
pub mod items;

use crate::service::ItemService;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use envelope::Envelope;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: ItemService,
}

impl AppState {
    pub fn new(service: ItemService) -> Self {
        Self { service }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz).fallback(method_not_allowed))
        .route("/readyz", get(health::readyz).fallback(method_not_allowed))
        .route("/items", get(items::list_items).fallback(method_not_allowed))
        .route(
            "/items-completed",
            get(items::list_completed_items).fallback(method_not_allowed),
        )
        .route(
            "/items-incompleted",
            get(items::list_incomplete_items).fallback(method_not_allowed),
        )
        .route("/item", post(items::create_item).fallback(method_not_allowed))
        .route(
            "/item/:id",
            get(items::get_item)
                .post(items::update_item)
                .delete(items::delete_item)
                .fallback(method_not_allowed),
        )
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn method_not_allowed() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(Envelope::failed("Method not allowed")),
    )
}

async fn unknown_route() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::failed("Route not found")))
}
