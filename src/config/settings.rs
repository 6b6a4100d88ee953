use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::boards::DEFAULT_BOARD_ID;

pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
pub const ADMIN_PASSCODE_VAR: &str = "ADMIN_PASSCODE";
pub const API_URL_VAR: &str = "LEADERBOARD_API_URL";

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub database_path: String,
    /// Empty passcode disables admin checks.
    pub admin_passcode: String,
    pub default_limit: Option<usize>,
    pub max_limit: usize,
    pub history_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_path: "club_leaderboard.db".to_string(),
            admin_passcode: "clubsecret".to_string(),
            default_limit: None,
            max_limit: 1000,
            history_limit: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub rank_points: BTreeMap<u8, i64>,
    pub default_board: String,
    pub default_label: String,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            rank_points: default_rank_points(),
            default_board: DEFAULT_BOARD_ID.to_string(),
            default_label: "Game result".to_string(),
        }
    }
}

impl ScoringSettings {
    pub fn points_for(&self, rank: u8) -> Option<i64> {
        self.rank_points.get(&rank).copied()
    }
}

pub fn default_rank_points() -> BTreeMap<u8, i64> {
    BTreeMap::from([
        (1, 200),
        (2, 150),
        (3, 120),
        (4, 100),
        (5, 80),
        (6, 60),
        (7, 50),
        (8, 40),
        (9, 30),
    ])
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub detail_cache_ttl: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            user_agent: "ClubLeaderboard/1.0",
            timeout_secs: 30,
            detail_cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub scoring: ScoringSettings,
    pub client: ClientSettings,
}

/// On-disk shape of `config.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    database_path: Option<String>,
    admin_passcode: Option<String>,
    api_url: Option<String>,
    default_board: Option<String>,
    rank_points: Option<BTreeMap<u8, i64>>,
    detail_cache_ttl_secs: Option<u64>,
    timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, then the optional JSON file, then environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::new();

        let path = path.unwrap_or_else(|| Path::new("config.json"));
        if path.exists() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let file: FileConfig = serde_json::from_str(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            config.apply_file(file);
            log::info!("Loaded configuration from {}", path.display());
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(path) = file.database_path {
            self.server.database_path = path;
        }
        if let Some(passcode) = file.admin_passcode {
            self.server.admin_passcode = passcode;
        }
        if let Some(url) = file.api_url {
            self.client.api_url = url;
        }
        if let Some(board) = file.default_board {
            self.scoring.default_board = board;
        }
        if let Some(points) = file.rank_points {
            self.scoring.rank_points = points;
        }
        if let Some(secs) = file.detail_cache_ttl_secs {
            self.client.detail_cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = file.timeout_secs {
            self.client.timeout_secs = secs;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DATABASE_PATH_VAR) {
            self.server.database_path = path;
        }
        if let Some(passcode) = lookup(ADMIN_PASSCODE_VAR) {
            self.server.admin_passcode = passcode;
        }
        if let Some(url) = lookup(API_URL_VAR) {
            self.client.api_url = url;
        }
    }
}
