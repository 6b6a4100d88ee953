use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{Map, Value};

use super::{parse_body, AppState};
use crate::api::errors::{ApiError, ApiResult};
use crate::api::models::{
    BadgeAwarded, BadgeRequest, BoardCreated, BoardRequest, CreatePlayerRequest, PlayerCreated,
    ProfileUpdated, ScoreRecorded,
};
use crate::database::{badges, boards, history, players, ProfileUpdate};
use crate::domain::badges::DEFAULT_ICON;
use crate::domain::{Badge, Board};

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn create_player(state: &AppState, body: &str) -> ApiResult<Response> {
    let request: CreatePlayerRequest = parse_body(body)?;
    state.require_passcode(request.passcode.as_deref())?;

    let nickname = trimmed(request.nickname)
        .ok_or_else(|| ApiError::BadRequest("nickname is required".to_string()))?;
    let slogan = trimmed(request.slogan).unwrap_or_default();
    let avatar_url = trimmed(request.avatar_url);

    let conn = state.connection()?;
    if players::find_by_nickname(&conn, &nickname)?.is_some() {
        return Err(ApiError::BadRequest(format!("nickname {nickname} is already taken")));
    }

    let player = players::insert_player(&conn, &nickname, &slogan, avatar_url.as_deref())
        .map_err(|e| ApiError::on_conflict(e, format!("nickname {nickname} is already taken")))?;
    log::info!("Created player {} ({})", player.nickname, player.id);

    Ok((
        StatusCode::CREATED,
        Json(PlayerCreated { ok: true, player_id: player.id }),
    )
        .into_response())
}

/// Only keys present in the body are changed; an empty avatar clears it.
pub fn update_profile(state: &AppState, body: &str) -> ApiResult<Response> {
    let request: Map<String, Value> = parse_body(body)?;
    state.require_passcode(request.get("passcode").and_then(Value::as_str))?;

    let player_id = request
        .get("id")
        .or_else(|| request.get("player_id"))
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::BadRequest("Invalid player id".to_string()))?;

    let text = |key: &str| {
        request
            .get(key)
            .map(|v| v.as_str().unwrap_or_default().trim().to_string())
    };

    let mut update = ProfileUpdate::default();
    if let Some(nickname) = text("nickname") {
        if nickname.is_empty() {
            return Err(ApiError::BadRequest("nickname cannot be empty".to_string()));
        }
        update.nickname = Some(nickname);
    }
    update.slogan = text("slogan");
    update.avatar_url = text("avatar_url").map(|url| Some(url).filter(|u| !u.is_empty()));

    if update.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let conn = state.connection()?;
    if players::find_by_id(&conn, player_id)?.is_none() {
        return Err(ApiError::NotFound("Player not found".to_string()));
    }
    if let Some(nickname) = &update.nickname {
        if let Some(other) = players::find_by_nickname(&conn, nickname)? {
            if other.id != player_id {
                return Err(ApiError::BadRequest(format!("nickname {nickname} is already taken")));
            }
        }
    }

    players::update_profile(&conn, player_id, &update).map_err(|e| {
        let nickname = update.nickname.as_deref().unwrap_or_default();
        ApiError::on_conflict(e, format!("nickname {nickname} is already taken"))
    })?;
    log::info!("Updated profile of player {}", player_id);

    Ok(Json(ProfileUpdated { ok: true, status: "updated" }).into_response())
}

pub fn award_badge(state: &AppState, body: &str) -> ApiResult<Response> {
    let request: BadgeRequest = parse_body(body)?;
    state.require_passcode(request.passcode.as_deref())?;

    let player_id = request
        .player_id
        .ok_or_else(|| ApiError::BadRequest("player_id is required".to_string()))?;
    let icon = trimmed(request.icon).unwrap_or_else(|| DEFAULT_ICON.to_string());
    let label = trimmed(request.label).unwrap_or_else(|| icon.clone());

    let conn = state.connection()?;
    if players::find_by_id(&conn, player_id)?.is_none() {
        return Err(ApiError::NotFound("Player not found".to_string()));
    }

    let row = badges::insert_badge(&conn, player_id, &icon, &label)?;
    log::info!("Awarded badge {} to player {}", row.label, player_id);

    Ok((
        StatusCode::CREATED,
        Json(BadgeAwarded {
            ok: true,
            player_id,
            badge: Badge { icon: row.icon, label: row.label },
        }),
    )
        .into_response())
}

pub fn create_board(state: &AppState, body: &str) -> ApiResult<Response> {
    let request: BoardRequest = parse_body(body)?;
    state.require_passcode(request.passcode.as_deref())?;

    let id = trimmed(request.id)
        .ok_or_else(|| ApiError::BadRequest("board id is required".to_string()))?;
    let label = trimmed(request.label).unwrap_or_else(|| id.clone());

    let conn = state.connection()?;
    if boards::find_by_id(&conn, &id)?.is_some() {
        return Err(ApiError::BadRequest(format!("Leaderboard {id} already exists")));
    }

    let board = boards::insert_board(&conn, &id, &label)
        .map_err(|e| ApiError::on_conflict(e, format!("Leaderboard {id} already exists")))?;
    log::info!("Created leaderboard {} ({})", board.label, board.id);

    Ok((
        StatusCode::CREATED,
        Json(BoardCreated {
            ok: true,
            board: Board { id: board.id, label: board.label },
        }),
    )
        .into_response())
}

/// Manual point adjustment outside of a game, e.g. a penalty or a bounty.
pub fn record_score(state: &AppState, body: &str) -> ApiResult<Response> {
    let request: Map<String, Value> = parse_body(body)?;
    state.require_passcode(request.get("passcode").and_then(Value::as_str))?;

    let player_id = request
        .get("player_id")
        .or_else(|| request.get("id"))
        .and_then(integer)
        .ok_or_else(|| ApiError::BadRequest("Invalid player id".to_string()))?;
    let delta = request
        .get("delta")
        .and_then(integer)
        .ok_or_else(|| ApiError::BadRequest("delta must be an integer".to_string()))?;
    let reason = request
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    let requested_board = request
        .get("board_id")
        .or_else(|| request.get("board"))
        .and_then(Value::as_str);

    let conn = state.connection()?;
    let board_id = state.resolve_board(&conn, requested_board)?;
    if players::find_by_id(&conn, player_id)?.is_none() {
        return Err(ApiError::NotFound("Player not found".to_string()));
    }

    history::insert_entry(&conn, player_id, &board_id, delta, reason)?;
    log::info!("Adjusted player {} by {} on {}", player_id, delta, board_id);

    Ok((
        StatusCode::CREATED,
        Json(ScoreRecorded {
            ok: true,
            player_id,
            board: board_id,
            delta,
        }),
    )
        .into_response())
}

/// Integers may arrive as numbers or numeric strings.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
