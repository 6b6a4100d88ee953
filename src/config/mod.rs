pub mod boards;
pub mod settings;

pub use boards::{get_boards, BoardConfig, DEFAULT_BOARD_ID, DEFAULT_BOARD_LABEL};
pub use settings::AppConfig;
