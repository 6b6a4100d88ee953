use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Board;

fn parse_board_row(row: &rusqlite::Row) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        label: row.get(1)?,
    })
}

/// Boards in creation order.
pub fn list_all(conn: &Connection) -> Result<Vec<Board>> {
    let mut stmt = conn.prepare("SELECT id, label FROM boards ORDER BY rowid")?;
    let rows = stmt
        .query_map([], parse_board_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_by_id(conn: &Connection, id: &str) -> Result<Option<Board>> {
    conn.query_row(
        "SELECT id, label FROM boards WHERE id = ?1",
        params![id],
        parse_board_row,
    )
    .optional()
    .context("Failed to query board by id")
}

pub fn insert_board(conn: &Connection, id: &str, label: &str) -> Result<Board> {
    conn.query_row(
        "INSERT INTO boards (id, label) VALUES (?1, ?2) RETURNING id, label",
        params![id, label],
        parse_board_row,
    )
    .with_context(|| format!("Failed to insert board {id}"))
}

/// Inserts the board unless one with the same id exists.
pub fn ensure_board(conn: &Connection, id: &str, label: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO boards (id, label) VALUES (?1, ?2)",
        params![id, label],
    )
    .with_context(|| format!("Failed to ensure board {id}"))
    .map(|_| ())
}
