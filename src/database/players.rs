use anyhow::{Context, Result};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Player, PlayerStanding, ProfileUpdate};

const PLAYER_COLUMNS: &str = "id, nickname, slogan, avatar_url, created_at, updated_at";

// Totals are per board: sum and count of the player's history on that board.
const STANDING_SELECT: &str = "
    SELECT
        p.id,
        p.nickname,
        COALESCE(SUM(h.delta), 0) AS total_points,
        COUNT(h.id) AS finals_played,
        p.slogan,
        p.avatar_url
    FROM players p
    LEFT JOIN score_history h ON h.player_id = p.id AND h.board_id = ?1
";

pub fn insert_player(
    conn: &Connection,
    nickname: &str,
    slogan: &str,
    avatar_url: Option<&str>,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (nickname, slogan, avatar_url) VALUES (?1, ?2, ?3) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(&sql, params![nickname, slogan, avatar_url], parse_player_row)
        .with_context(|| format!("Failed to insert player {nickname}"))
}

/// Returns the existing player with this nickname or creates one.
pub fn find_or_create(
    conn: &Connection,
    nickname: &str,
    slogan: &str,
    avatar_url: Option<&str>,
) -> Result<Player> {
    if let Some(existing) = find_by_nickname(conn, nickname)? {
        return Ok(existing);
    }
    log::info!("Creating player {}", nickname);
    insert_player(conn, nickname, slogan, avatar_url)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        nickname: row.get(1)?,
        slogan: row.get(2)?,
        avatar_url: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn parse_standing_row(row: &rusqlite::Row) -> rusqlite::Result<PlayerStanding> {
    Ok(PlayerStanding {
        player_id: row.get(0)?,
        nickname: row.get(1)?,
        total_points: row.get(2)?,
        finals_played: row.get(3)?,
        slogan: row.get(4)?,
        avatar_url: row.get(5)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn find_by_nickname(conn: &Connection, nickname: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE nickname = ?1");

    conn.query_row(&sql, params![nickname], parse_player_row)
        .optional()
        .context("Failed to query player by nickname")
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
        .context("Failed to count players")
}

/// Players ordered by points on `board_id`, highest first, ties by nickname.
/// `None` means no limit.
pub fn list_standings(
    conn: &Connection,
    board_id: &str,
    limit: Option<usize>,
) -> Result<Vec<PlayerStanding>> {
    let sql = format!(
        "{STANDING_SELECT} GROUP BY p.id ORDER BY total_points DESC, p.nickname ASC LIMIT ?2"
    );
    // SQLite treats a negative LIMIT as unbounded
    let limit = limit.map(|l| l as i64).unwrap_or(-1);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![board_id, limit], parse_standing_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_standing(
    conn: &Connection,
    player_id: i64,
    board_id: &str,
) -> Result<Option<PlayerStanding>> {
    let sql = format!("{STANDING_SELECT} WHERE p.id = ?2 GROUP BY p.id");

    conn.query_row(&sql, params![board_id, player_id], parse_standing_row)
        .optional()
        .context("Failed to query player standing")
}

/// Returns false when nothing was changed (empty update or unknown id).
pub fn update_profile(conn: &Connection, player_id: i64, update: &ProfileUpdate) -> Result<bool> {
    if update.is_empty() {
        return Ok(false);
    }

    let mut fields: Vec<&str> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(nickname) = &update.nickname {
        fields.push("nickname = ?");
        values.push(SqlValue::Text(nickname.clone()));
    }
    if let Some(slogan) = &update.slogan {
        fields.push("slogan = ?");
        values.push(SqlValue::Text(slogan.clone()));
    }
    if let Some(avatar_url) = &update.avatar_url {
        fields.push("avatar_url = ?");
        values.push(avatar_url.clone().map_or(SqlValue::Null, SqlValue::Text));
    }
    values.push(SqlValue::Integer(player_id));

    let sql = format!(
        "UPDATE players SET {}, updated_at = datetime('now') WHERE id = ?",
        fields.join(", ")
    );

    let changed = conn
        .execute(&sql, rusqlite::params_from_iter(values.iter()))
        .with_context(|| format!("Failed to update profile of player {player_id}"))?;

    Ok(changed > 0)
}

pub fn touch(conn: &Connection, player_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE players SET updated_at = datetime('now') WHERE id = ?1",
        params![player_id],
    )
    .context("Failed to touch player")
    .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BOARD_ID;
    use crate::database::{history, test_connection};

    #[test]
    fn test_find_or_create_reuses_existing() {
        let conn = test_connection();
        let first = find_or_create(&conn, "AceHigh", "Stack 'em high", None).unwrap();
        let second = find_or_create(&conn, "AceHigh", "ignored", None).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.slogan, "Stack 'em high");
        assert_eq!(count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_standings_are_scoped_to_board() {
        let conn = test_connection();
        crate::database::boards::insert_board(&conn, "spring", "Spring Season").unwrap();
        let ace = insert_player(&conn, "AceHigh", "", None).unwrap();
        let river = insert_player(&conn, "RiverQueen", "", None).unwrap();

        history::insert_entry(&conn, ace.id, DEFAULT_BOARD_ID, 200, "win").unwrap();
        history::insert_entry(&conn, river.id, DEFAULT_BOARD_ID, 150, "second").unwrap();
        history::insert_entry(&conn, river.id, "spring", 120, "third").unwrap();

        let all_time = list_standings(&conn, DEFAULT_BOARD_ID, None).unwrap();
        assert_eq!(all_time[0].nickname, "AceHigh");
        assert_eq!(all_time[0].total_points, 200);

        let spring = list_standings(&conn, "spring", None).unwrap();
        assert_eq!(spring[0].nickname, "RiverQueen");
        assert_eq!(spring[0].total_points, 120);
        assert_eq!(spring[0].finals_played, 1);
        assert_eq!(spring[1].total_points, 0);
        assert_eq!(spring[1].finals_played, 0);
    }

    #[test]
    fn test_standings_tie_break_and_limit() {
        let conn = test_connection();
        for name in ["Zed", "Amy", "Bob"] {
            let player = insert_player(&conn, name, "", None).unwrap();
            history::insert_entry(&conn, player.id, DEFAULT_BOARD_ID, 100, "").unwrap();
        }

        let rows = list_standings(&conn, DEFAULT_BOARD_ID, Some(2)).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.nickname.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Bob"]);
    }

    #[test]
    fn test_update_profile() {
        let conn = test_connection();
        let player = insert_player(&conn, "LuckyChip", "old", Some("http://a")).unwrap();
        let other = insert_player(&conn, "SilentShark", "untouched", None).unwrap();

        let update = ProfileUpdate {
            slogan: Some("Good vibes".to_string()),
            avatar_url: Some(None),
            ..Default::default()
        };
        assert!(update_profile(&conn, player.id, &update).unwrap());
        assert!(!update_profile(&conn, player.id, &ProfileUpdate::default()).unwrap());

        let reloaded = find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(reloaded.nickname, "LuckyChip");
        assert_eq!(reloaded.slogan, "Good vibes");
        assert_eq!(reloaded.avatar_url, None);

        let untouched = find_by_id(&conn, other.id).unwrap().unwrap();
        assert_eq!(untouched.slogan, "untouched");
        assert!(!update_profile(&conn, 999, &update).unwrap());
    }
}
