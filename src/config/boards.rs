/// Board configuration seeded into a fresh database.
///
/// Further seasons can be added at runtime through `resource=board`.
pub const DEFAULT_BOARD_ID: &str = "alltime";
pub const DEFAULT_BOARD_LABEL: &str = "All Time";

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub id: &'static str,
    pub label: &'static str,
}

impl BoardConfig {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

/// Get the list of boards every database starts with
pub fn get_boards() -> Vec<BoardConfig> {
    vec![BoardConfig::new(DEFAULT_BOARD_ID, DEFAULT_BOARD_LABEL)]
}
