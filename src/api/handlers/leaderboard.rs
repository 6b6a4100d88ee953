use axum::response::{IntoResponse, Json, Response};

use super::{AppState, ResourceParams};
use crate::api::errors::ApiResult;
use crate::database::{badges, boards, players, BadgeRow};
use crate::domain::{Badge, Board, LeaderboardResponse, PlayerSummary};

pub fn get_leaderboard(state: &AppState, params: &ResourceParams) -> ApiResult<Response> {
    let server = &state.config.server;
    let limit = params.limit(server.default_limit, server.max_limit)?;

    let conn = state.connection()?;
    let board_id = state.resolve_board(&conn, params.board.as_deref())?;

    let standings = players::list_standings(&conn, &board_id, limit)?;
    let mut badges_by_player = badges::list_grouped(&conn)?;
    let boards = boards::list_all(&conn)?;

    let players = standings
        .into_iter()
        .map(|row| PlayerSummary {
            id: row.player_id,
            badges: to_badges(badges_by_player.remove(&row.player_id).unwrap_or_default()),
            nickname: row.nickname,
            total_points: row.total_points,
            finals_played: row.finals_played,
            slogan: row.slogan,
            avatar_url: row.avatar_url,
        })
        .collect();

    Ok(Json(LeaderboardResponse {
        ok: true,
        players,
        boards: boards
            .into_iter()
            .map(|b| Board { id: b.id, label: b.label })
            .collect(),
        active_board: Some(board_id),
        error: None,
    })
    .into_response())
}

pub fn to_badges(rows: Vec<BadgeRow>) -> Vec<Badge> {
    rows.into_iter()
        .map(|row| Badge { icon: row.icon, label: row.label })
        .collect()
}
