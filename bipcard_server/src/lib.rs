//! HTTP surface of the BipCard API.
//!
//! Two read-only routes drive the card pipeline in `bipcard_lib` and render
//! the records as JSON. Errors come back as plain text.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use bipcard_lib::BipCardClient;

pub mod config;
mod error;
mod routes;

pub use config::ServerArgs;
pub use error::ApiError;

pub const CARD_INFO_ROUTE: &str = "/api/v1/bipcard/:card_number/info";
pub const CARD_MOVEMENTS_ROUTE: &str = "/api/v1/bipcard/:card_number/movements";

/// Shared handler state. The client is immutable, so requests never contend.
#[derive(Clone)]
pub struct AppState {
    client: Arc<BipCardClient>,
}

impl AppState {
    pub fn new(client: BipCardClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(CARD_INFO_ROUTE, get(routes::card_info_handler))
        .route(CARD_MOVEMENTS_ROUTE, get(routes::card_movements_handler))
        .with_state(state)
}
