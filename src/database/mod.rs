pub mod badges;
pub mod boards;
pub mod connection;
pub mod history;
pub mod models;
pub mod players;
pub mod seed;
pub mod setup;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;

/// Fresh in-memory database with the schema and default boards.
#[cfg(test)]
pub(crate) fn test_connection() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    setup::initialize_database(&conn, false).unwrap();
    conn
}
