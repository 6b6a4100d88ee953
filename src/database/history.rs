use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::HistoryRow;
use super::players;

/// Appends a point change and bumps the player's `updated_at`.
pub fn insert_entry(
    conn: &Connection,
    player_id: i64,
    board_id: &str,
    delta: i64,
    reason: &str,
) -> Result<()> {
    let sql = "INSERT INTO score_history (player_id, board_id, delta, reason) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(sql, params![player_id, board_id, delta, reason])
        .with_context(|| format!("Failed to record score change for player {player_id}"))?;
    players::touch(conn, player_id)
}

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<HistoryRow> {
    Ok(HistoryRow {
        delta: row.get(0)?,
        reason: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Newest first. Entries written in the same second keep insertion order reversed.
pub fn list_for_player(
    conn: &Connection,
    player_id: i64,
    board_id: &str,
    limit: usize,
) -> Result<Vec<HistoryRow>> {
    let sql = "SELECT delta, reason, created_at FROM score_history WHERE player_id = ?1 AND board_id = ?2 ORDER BY created_at DESC, id DESC LIMIT ?3";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id, board_id, limit as i64], parse_history_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
