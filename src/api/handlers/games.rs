use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use super::{parse_body, AppState};
use crate::api::errors::{ApiError, ApiResult};
use crate::api::models::GameRequest;
use crate::services::recording::RecordingService;

pub fn submit_game(state: &AppState, body: &str) -> ApiResult<Response> {
    let request: GameRequest = parse_body(body)?;
    state.require_passcode(request.passcode.as_deref())?;

    let placements = match request.placements {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(ApiError::BadRequest(
                "placements must be a non-empty list".to_string(),
            ))
        }
    };

    let conn = state.connection()?;
    let board_id = state.resolve_board(&conn, request.board_id.as_deref())?;

    let service = RecordingService::new(&state.config.scoring);
    let summary = service.record(&conn, &board_id, request.label.as_deref(), &placements)?;

    let status = if summary.ok {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(summary)).into_response())
}
