use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;

use crate::api::errors::{ApiError, ApiResult};
use crate::config::settings::AppConfig;
use crate::database::{self, boards, DbConn, DbPool};

pub mod admin;
pub mod games;
pub mod leaderboard;
pub mod players;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn connection(&self) -> ApiResult<DbConn> {
        Ok(database::get_connection(&self.pool)?)
    }

    /// Empty passcode in the config disables the check.
    pub fn require_passcode(&self, provided: Option<&str>) -> ApiResult<()> {
        let expected = self.config.server.admin_passcode.as_str();
        if expected.is_empty() || provided.map(str::trim) == Some(expected) {
            Ok(())
        } else {
            log::warn!("Rejected admin request with invalid passcode");
            Err(ApiError::Passcode)
        }
    }

    /// Requested board, or the configured default. Unknown boards are rejected.
    pub fn resolve_board(&self, conn: &DbConn, requested: Option<&str>) -> ApiResult<String> {
        let board_id = requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.config.scoring.default_board);

        match boards::find_by_id(conn, board_id)? {
            Some(board) => Ok(board.id),
            None => Err(ApiError::UnknownBoard(board_id.to_string())),
        }
    }
}

/// Query string shared by every resource. Numbers are parsed by the
/// handlers so bad input gets a JSON error instead of a plain rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceParams {
    pub resource: Option<String>,
    pub board: Option<String>,
    pub id: Option<String>,
    pub limit: Option<String>,
}

impl ResourceParams {
    pub fn player_id(&self) -> ApiResult<i64> {
        let raw = self
            .id
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;
        raw.trim()
            .parse()
            .map_err(|_| ApiError::BadRequest("Invalid player id".to_string()))
    }

    pub fn limit(&self, default: Option<usize>, max: usize) -> ApiResult<Option<usize>> {
        match self.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            None => Ok(default),
            Some(raw) => raw
                .parse::<usize>()
                .map(|limit| Some(limit.clamp(1, max)))
                .map_err(|_| ApiError::BadRequest("limit must be an integer".to_string())),
        }
    }
}

/// Bodies arrive as plain text, so JSON is parsed here rather than by an extractor.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON payload: {e}")))
}

pub async fn handle_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResourceParams>,
) -> ApiResult<Response> {
    match params.resource.as_deref().unwrap_or("leaderboard") {
        "leaderboard" => leaderboard::get_leaderboard(&state, &params),
        "player" => players::get_player_detail(&state, &params),
        other => Err(ApiError::UnknownResource(other.to_string())),
    }
}

pub async fn handle_post(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResourceParams>,
    body: String,
) -> ApiResult<Response> {
    match params.resource.as_deref().unwrap_or_default() {
        "game" => games::submit_game(&state, &body),
        "player" => admin::create_player(&state, &body),
        "profile" => admin::update_profile(&state, &body),
        "badge" => admin::award_badge(&state, &body),
        "board" => admin::create_board(&state, &body),
        "score" => admin::record_score(&state, &body),
        other => Err(ApiError::UnknownResource(other.to_string())),
    }
}
