use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::{
    foundation::error::BlockPartyError,
    model::{Square, SquareState},
};

/// Handler failure rendered as a plain-text status response.
#[derive(Debug)]
pub(super) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Validation problems are echoed to the caller; everything else is logged and
    /// answered with `fallback`.
    fn from_error(err: BlockPartyError, fallback: &str) -> Self {
        match err {
            BlockPartyError::Validation(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg,
            },
            other => {
                tracing::error!("{fallback}: {other}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: fallback.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

pub(super) async fn healthz() -> &'static str {
    "ok"
}

pub(super) async fn get_collection(State(state): State<AppState>) -> Json<SquareState> {
    Json(state.store.load().await)
}

pub(super) async fn save_collection(
    State(state): State<AppState>,
    Json(body): Json<SquareState>,
) -> Result<StatusCode, ApiError> {
    const FAILED: &str = "An error occurred while saving squares";
    body.validate()
        .map_err(|e| ApiError::from_error(e, FAILED))?;
    state
        .store
        .save(&body)
        .await
        .map_err(|e| ApiError::from_error(e, FAILED))?;
    tracing::info!(squares = body.len(), "square state replaced");
    Ok(StatusCode::OK)
}

pub(super) async fn add_square(
    State(state): State<AppState>,
    Json(square): Json<Square>,
) -> Result<Json<SquareState>, ApiError> {
    const FAILED: &str = "An error occurred while adding a square";
    square
        .validate()
        .map_err(|e| ApiError::from_error(e, FAILED))?;
    let next = state
        .store
        .append(square)
        .await
        .map_err(|e| ApiError::from_error(e, FAILED))?;
    tracing::info!(squares = next.len(), "square added");
    Ok(Json(next))
}

pub(super) async fn clear_collection(
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .clear()
        .await
        .map_err(|e| ApiError::from_error(e, "An error occurred while clearing squares"))?;
    tracing::info!("square state cleared");
    Ok(StatusCode::OK)
}
