use anyhow::Result;

use super::LeaderboardApi;
use crate::config::settings::ClientSettings;
use crate::domain::{GameSubmission, GameSummary, LeaderboardResponse, PlayerDetailResponse};
use crate::http::JsonClient;

/// `LeaderboardApi` over HTTP against a `?resource=` endpoint
pub struct ApiClient {
    http: JsonClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            http: JsonClient::new(settings.user_agent, settings.timeout_secs)?,
            base_url: settings.api_url.clone(),
        })
    }
}

fn resource_query(resource: &str, board: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("resource", resource.to_string())];
    if let Some(board) = board.map(str::trim).filter(|b| !b.is_empty()) {
        query.push(("board", board.to_string()));
    }
    query
}

impl LeaderboardApi for ApiClient {
    async fn fetch_leaderboard(&self, board: Option<&str>) -> Result<LeaderboardResponse> {
        log::debug!("Fetching leaderboard (board: {:?})", board);
        let query = resource_query("leaderboard", board);
        self.http.get_json(&self.base_url, &query).await
    }

    async fn fetch_player(&self, player_id: i64, board: Option<&str>) -> Result<PlayerDetailResponse> {
        log::debug!("Fetching player {}", player_id);
        let mut query = resource_query("player", board);
        query.push(("id", player_id.to_string()));
        self.http.get_json(&self.base_url, &query).await
    }

    async fn submit_game(&self, submission: &GameSubmission) -> Result<GameSummary> {
        let query = resource_query("game", None);
        match self.http.post_json(&self.base_url, &query, submission).await {
            Ok(summary) => Ok(summary),
            // Reached the server but got something other than JSON back
            Err(e) if e.downcast_ref::<reqwest::Error>().is_none() => {
                log::warn!("Unreadable game submission response: {:#}", e);
                Ok(GameSummary::default())
            }
            Err(e) => Err(e),
        }
    }
}
