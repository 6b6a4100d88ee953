use anyhow::{Context, Result};
use rusqlite::Connection;

use super::boards;
use crate::config::get_boards;

const DROP_STATEMENTS: [&str; 4] = [
    "DROP TABLE IF EXISTS badges",
    "DROP TABLE IF EXISTS score_history",
    "DROP TABLE IF EXISTS players",
    "DROP TABLE IF EXISTS boards",
];

/// Creates missing tables and the configured boards. `force` drops all data first.
pub fn initialize_database(conn: &Connection, force: bool) -> Result<()> {
    if force {
        for statement in DROP_STATEMENTS {
            execute_sql(conn, statement)?;
        }
        log::warn!("Dropped existing leaderboard tables");
    }

    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    for board in get_boards() {
        boards::ensure_board(conn, board.id, board.label)?;
    }

    log::info!("Database schema initialized");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{players, test_connection};

    #[test]
    fn test_initialize_is_idempotent_and_force_resets() {
        let conn = test_connection();
        players::insert_player(&conn, "AceHigh", "", None).unwrap();

        initialize_database(&conn, false).unwrap();
        assert_eq!(players::count(&conn).unwrap(), 1);

        initialize_database(&conn, true).unwrap();
        assert_eq!(players::count(&conn).unwrap(), 0);
        assert_eq!(boards::list_all(&conn).unwrap().len(), 1);
    }
}
