use anyhow::{anyhow, Result};
use std::time::Duration;

use super::LeaderboardApi;
use crate::cache::ExpiringCache;
use crate::domain::boards::{board_label, choose_active, NO_BOARD_LABEL};
use crate::domain::format::{format_delta, format_points, format_timestamp};
use crate::domain::search::filter_by_nickname;
use crate::domain::{
    Board, HistoryEntry, LeaderboardResponse, PlayerDetailResponse, PlayerProfile, PlayerSummary,
};

pub const LOAD_FAILED: &str = "Unable to fetch leaderboard. Please check that the backend is reachable.";
pub const DETAIL_FAILED: &str = "Unable to load player details";

/// One rendered leaderboard row; `rank` is the 1-based position in the visible list
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow<'a> {
    pub rank: usize,
    pub player: &'a PlayerSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub delta: String,
    pub reason: String,
    pub when: String,
}

/// Contents of the player detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPanel {
    pub nickname: String,
    pub points: String,
    pub slogan: String,
    pub finals: String,
    pub badges: Vec<String>,
    pub avatar_url: Option<String>,
    pub history: Vec<HistoryLine>,
    pub empty_history: Option<&'static str>,
}

impl PlayerPanel {
    pub fn from_detail(player: &PlayerProfile, history: &[HistoryEntry]) -> Self {
        let slogan = player.slogan.trim();
        let history: Vec<HistoryLine> = history
            .iter()
            .map(|entry| HistoryLine {
                delta: format_delta(entry.delta),
                reason: Some(entry.reason.trim())
                    .filter(|r| !r.is_empty())
                    .unwrap_or("—")
                    .to_string(),
                when: format_timestamp(entry.created_at.as_deref()),
            })
            .collect();

        Self {
            nickname: player.nickname.clone(),
            points: format_points(player.total_points),
            slogan: if slogan.is_empty() { "No slogan yet.".to_string() } else { slogan.to_string() },
            finals: format!("{} final table appearances", player.finals_played),
            badges: player.badges.iter().map(|b| format!("{} {}", b.icon, b.label)).collect(),
            avatar_url: player.avatar_url.clone().filter(|u| !u.trim().is_empty()),
            empty_history: history.is_empty().then_some("No recent score changes."),
            history,
        }
    }

    pub fn failed() -> Self {
        Self {
            nickname: "Error".to_string(),
            points: "—".to_string(),
            slogan: DETAIL_FAILED.to_string(),
            finals: "—".to_string(),
            badges: Vec::new(),
            avatar_url: None,
            history: Vec::new(),
            empty_history: Some("Failed to load history"),
        }
    }
}

/// Leaderboard state with board selection, nickname search and a detail cache
pub struct LeaderboardViewer<A> {
    api: A,
    players: Vec<PlayerSummary>,
    filtered: Vec<PlayerSummary>,
    boards: Vec<Board>,
    current_board: Option<String>,
    search: String,
    details: ExpiringCache<i64, PlayerDetailResponse>,
}

impl<A: LeaderboardApi> LeaderboardViewer<A> {
    pub fn new(api: A, detail_ttl: Duration) -> Self {
        Self {
            api,
            players: Vec::new(),
            filtered: Vec::new(),
            boards: Vec::new(),
            current_board: None,
            search: String::new(),
            details: ExpiringCache::new(detail_ttl),
        }
    }

    /// Replaces the players with the given board's standings. On failure the
    /// previous state is left untouched.
    pub async fn load(&mut self, board: Option<&str>) -> Result<()> {
        let response = self.fetch(board).await?;
        self.apply(response, board);
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let board = self.current_board.clone();
        self.load(board.as_deref()).await
    }

    /// Switching boards resets the search once the new board has loaded.
    pub async fn select_board(&mut self, board_id: &str) -> Result<()> {
        let response = self.fetch(Some(board_id)).await?;
        self.search.clear();
        self.apply(response, Some(board_id));
        Ok(())
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.apply_search();
    }

    /// Detail for one player, served from the cache while fresh.
    pub async fn player_detail(&mut self, player_id: i64) -> Result<PlayerDetailResponse> {
        if let Some(cached) = self.details.get(&player_id) {
            log::debug!("Player {} served from cache", player_id);
            return Ok(cached);
        }

        let response = self
            .api
            .fetch_player(player_id, self.current_board.as_deref())
            .await?;
        if !response.ok || response.player.is_none() {
            return Err(anyhow!(response.error.unwrap_or_else(|| "Player not found".to_string())));
        }

        self.details.insert(player_id, response.clone());
        Ok(response)
    }

    pub async fn player_panel(&mut self, player_id: i64) -> PlayerPanel {
        match self.player_detail(player_id).await {
            Ok(PlayerDetailResponse { player: Some(player), history, .. }) => {
                PlayerPanel::from_detail(&player, &history)
            }
            Ok(_) => PlayerPanel::failed(),
            Err(e) => {
                log::warn!("Failed to load player {}: {:#}", player_id, e);
                PlayerPanel::failed()
            }
        }
    }

    pub fn rows(&self) -> Vec<LeaderboardRow<'_>> {
        self.filtered
            .iter()
            .enumerate()
            .map(|(index, player)| LeaderboardRow { rank: index + 1, player })
            .collect()
    }

    pub fn players(&self) -> &[PlayerSummary] {
        &self.players
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn current_board(&self) -> Option<&str> {
        self.current_board.as_deref()
    }

    pub fn current_board_label(&self) -> String {
        if self.boards.is_empty() {
            return NO_BOARD_LABEL.to_string();
        }
        board_label(&self.boards, self.current_board.as_deref())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn cached_details(&self) -> usize {
        self.details.len()
    }

    async fn fetch(&self, board: Option<&str>) -> Result<LeaderboardResponse> {
        let response = self.api.fetch_leaderboard(board).await?;
        if !response.ok {
            return Err(anyhow!(response.error.unwrap_or_else(|| "Failed to load leaderboard".to_string())));
        }
        Ok(response)
    }

    fn apply(&mut self, response: LeaderboardResponse, requested: Option<&str>) {
        self.players = response.players;
        self.details.clear();
        self.update_boards(response.boards, response.active_board.as_deref().or(requested));
        self.apply_search();
        log::info!(
            "Loaded {} players for {}",
            self.players.len(),
            self.current_board_label()
        );
    }

    fn update_boards(&mut self, boards: Vec<Board>, suggested: Option<&str>) {
        self.current_board = choose_active(&boards, suggested, self.current_board.as_deref());
        self.boards = boards;
    }

    fn apply_search(&mut self) {
        self.filtered = filter_by_nickname(&self.players, &self.search);
    }
}
