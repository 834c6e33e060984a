use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use bipcard_lib::{BipCardError, CardInfo, CardMovement};
use tracing::{info, warn};

use crate::{error::ApiError, AppState, CARD_INFO_ROUTE, CARD_MOVEMENTS_ROUTE};

pub(crate) async fn card_info_handler(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<Json<CardInfo>, ApiError> {
    let started = Instant::now();
    let result = state.client.card_info(&card_number).await;
    log_outcome(CARD_INFO_ROUTE, started, &result);
    Ok(Json(result?))
}

pub(crate) async fn card_movements_handler(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> Result<Json<Vec<CardMovement>>, ApiError> {
    let started = Instant::now();
    let result = state.client.card_movements(&card_number).await;
    log_outcome(CARD_MOVEMENTS_ROUTE, started, &result);
    Ok(Json(result?))
}

fn log_outcome<T>(route: &'static str, started: Instant, result: &Result<T, BipCardError>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(_) => info!(route, status = 200, elapsed_ms, "request served"),
        Err(e) if e.is_invalid_input() => {
            info!(route, status = 400, elapsed_ms, error = %e, "request rejected")
        }
        Err(e) => warn!(route, status = 500, elapsed_ms, error = %e, "request failed"),
    }
}
