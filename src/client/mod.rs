use anyhow::Result;

use crate::domain::{GameSubmission, GameSummary, LeaderboardResponse, PlayerDetailResponse};

pub mod api;
pub mod render;
pub mod submission;
pub mod viewer;

pub use api::ApiClient;
pub use submission::ResultForm;
pub use viewer::LeaderboardViewer;

/// Remote leaderboard API as seen by the viewer and the submission form
#[allow(async_fn_in_trait)]
pub trait LeaderboardApi {
    async fn fetch_leaderboard(&self, board: Option<&str>) -> Result<LeaderboardResponse>;

    async fn fetch_player(&self, player_id: i64, board: Option<&str>) -> Result<PlayerDetailResponse>;

    /// Errors only on transport failure; rejected submissions come back as `ok: false`.
    async fn submit_game(&self, submission: &GameSubmission) -> Result<GameSummary>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}
