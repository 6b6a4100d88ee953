use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::BadgeRow;

pub fn insert_badge(conn: &Connection, player_id: i64, icon: &str, label: &str) -> Result<BadgeRow> {
    conn.query_row(
        "INSERT INTO badges (player_id, icon, label) VALUES (?1, ?2, ?3) RETURNING player_id, icon, label",
        params![player_id, icon, label],
        parse_badge_row,
    )
    .with_context(|| format!("Failed to award badge to player {player_id}"))
}

fn parse_badge_row(row: &rusqlite::Row) -> rusqlite::Result<BadgeRow> {
    Ok(BadgeRow {
        player_id: row.get(0)?,
        icon: row.get(1)?,
        label: row.get(2)?,
    })
}

pub fn list_for_player(conn: &Connection, player_id: i64) -> Result<Vec<BadgeRow>> {
    let mut stmt =
        conn.prepare("SELECT player_id, icon, label FROM badges WHERE player_id = ?1 ORDER BY id")?;
    let rows = stmt
        .query_map(params![player_id], parse_badge_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// All badges keyed by player, each list in award order.
pub fn list_grouped(conn: &Connection) -> Result<HashMap<i64, Vec<BadgeRow>>> {
    let mut stmt = conn.prepare("SELECT player_id, icon, label FROM badges ORDER BY id")?;
    let rows = stmt
        .query_map([], parse_badge_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut grouped: HashMap<i64, Vec<BadgeRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.player_id).or_default().push(row);
    }
    Ok(grouped)
}
