use axum::response::{IntoResponse, Json, Response};
use chrono::NaiveDateTime;

use super::leaderboard::to_badges;
use super::{AppState, ResourceParams};
use crate::api::errors::{ApiError, ApiResult};
use crate::database::{badges, history, players};
use crate::domain::{HistoryEntry, PlayerDetailResponse, PlayerProfile};

pub fn get_player_detail(state: &AppState, params: &ResourceParams) -> ApiResult<Response> {
    let player_id = params.player_id()?;

    let conn = state.connection()?;
    let board_id = state.resolve_board(&conn, params.board.as_deref())?;

    let Some(player) = players::find_by_id(&conn, player_id)? else {
        return Err(ApiError::NotFound("Player not found".to_string()));
    };
    let standing = players::find_standing(&conn, player_id, &board_id)?;
    let history = history::list_for_player(
        &conn,
        player_id,
        &board_id,
        state.config.server.history_limit,
    )?;
    let badges = badges::list_for_player(&conn, player_id)?;

    let (total_points, finals_played) = standing
        .map(|s| (s.total_points, s.finals_played))
        .unwrap_or_default();

    Ok(Json(PlayerDetailResponse {
        ok: true,
        player: Some(PlayerProfile {
            id: player.id,
            nickname: player.nickname,
            total_points,
            finals_played,
            slogan: player.slogan,
            avatar_url: player.avatar_url,
            badges: to_badges(badges),
            created_at: Some(iso(player.created_at)),
            updated_at: Some(iso(player.updated_at)),
        }),
        history: history
            .into_iter()
            .map(|row| HistoryEntry {
                delta: row.delta,
                reason: row.reason,
                created_at: Some(iso(row.created_at)),
            })
            .collect(),
        error: None,
    })
    .into_response())
}

fn iso(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}
