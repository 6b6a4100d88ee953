use anyhow::{bail, Result};
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;

use super::{LeaderboardApi, StatusMessage};
use crate::config::settings::ScoringSettings;
use crate::domain::boards::{board_label, choose_active, fallback_boards};
use crate::domain::format::{format_errors, format_summary, suggest_label};
use crate::domain::scoring::{MAX_RANK, MIN_RANK};
use crate::domain::{Board, GameSubmission, Placement};

pub const NO_RESULTS: &str = "Enter at least one player result before submitting.";
pub const PASSCODE_REQUIRED: &str = "Admin passcode required.";
pub const NO_BOARD: &str = "Select a leaderboard / season before submitting.";
pub const INVALID_PASSCODE: &str = "Invalid passcode. Please refresh and enter the correct code.";
pub const NETWORK_ERROR: &str = "Network error: unable to submit results.";

const PASSCODE_CODE: &str = "PASSCODE";

/// Admin form for entering one game's finishing order
pub struct ResultForm<A> {
    api: A,
    scoring: ScoringSettings,
    passcode: Option<String>,
    boards: Vec<Board>,
    board_id: Option<String>,
    label: String,
    nicknames: BTreeMap<u8, String>,
}

impl<A: LeaderboardApi> ResultForm<A> {
    pub fn new(api: A, scoring: ScoringSettings, passcode: Option<String>) -> Self {
        let boards = fallback_boards();
        let board_id = boards.first().map(|b| b.id.clone());
        let mut form = Self {
            api,
            scoring,
            passcode: passcode.filter(|p| !p.trim().is_empty()),
            boards,
            board_id,
            label: String::new(),
            nicknames: BTreeMap::new(),
        };
        form.label = form.suggested_label(Local::now().naive_local());
        form
    }

    /// Pulls the board list from the leaderboard resource and switches to the
    /// board the backend marks active. Falls back to the default board when
    /// the backend is unavailable.
    pub async fn load_boards(&mut self) {
        let (boards, active) = match self.api.fetch_leaderboard(None).await {
            Ok(response) if response.ok => {
                let boards = if response.boards.is_empty() {
                    fallback_boards()
                } else {
                    response.boards
                };
                (boards, response.active_board)
            }
            Ok(response) => {
                log::warn!(
                    "Could not load leaderboards, using the default: {}",
                    response.error.as_deref().unwrap_or("Failed to load leaderboards")
                );
                (fallback_boards(), None)
            }
            Err(e) => {
                log::warn!("Could not load leaderboards, using the default: {:#}", e);
                (fallback_boards(), None)
            }
        };

        self.board_id = choose_active(&boards, active.as_deref(), None);
        self.boards = boards;
        self.refresh_suggested_label();
    }

    pub fn set_nickname(&mut self, rank: u8, nickname: &str) -> Result<()> {
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            bail!("Rank must be between {MIN_RANK} and {MAX_RANK}, got {rank}");
        }
        let nickname = nickname.trim();
        if nickname.is_empty() {
            self.nicknames.remove(&rank);
        } else {
            self.nicknames.insert(rank, nickname.to_string());
        }
        Ok(())
    }

    /// Selecting a board keeps a custom label but refreshes a suggested one.
    pub fn select_board(&mut self, board_id: &str) {
        let board_id = board_id.trim();
        self.board_id = (!board_id.is_empty()).then(|| board_id.to_string());
        self.refresh_suggested_label();
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.trim().to_string();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn has_passcode(&self) -> bool {
        self.passcode.is_some()
    }

    /// Filled rows in rank order, with points from the rank map.
    pub fn placements(&self) -> Vec<Placement> {
        self.nicknames
            .iter()
            .map(|(&rank, nickname)| Placement {
                rank,
                nickname: nickname.clone(),
                points: self.scoring.points_for(rank),
            })
            .collect()
    }

    pub async fn submit(&mut self) -> StatusMessage {
        let placements = self.placements();
        if placements.is_empty() {
            return StatusMessage::error(NO_RESULTS);
        }
        let Some(passcode) = self.passcode.clone() else {
            return StatusMessage::error(PASSCODE_REQUIRED);
        };
        let Some(board_id) = self.board_id.clone() else {
            return StatusMessage::error(NO_BOARD);
        };

        let label = if self.label.is_empty() {
            self.suggested_label(Local::now().naive_local())
        } else {
            self.label.clone()
        };
        let submission = GameSubmission {
            label,
            placements,
            passcode: Some(passcode),
            board_id: Some(board_id.clone()),
        };

        let summary = match self.api.submit_game(&submission).await {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("Game submission failed: {:#}", e);
                return StatusMessage::error(NETWORK_ERROR);
            }
        };

        if summary.ok {
            let saved_to = summary.board.as_deref().unwrap_or(board_id.as_str());
            let label = board_label(&self.boards, Some(saved_to));
            self.nicknames.clear();
            self.label = self.suggested_label(Local::now().naive_local());
            return StatusMessage::success(format_summary(&summary, Some(&label)));
        }

        if summary.code.as_deref() == Some(PASSCODE_CODE) {
            self.passcode = None;
            return StatusMessage::error(INVALID_PASSCODE);
        }
        StatusMessage::error(format_errors(&summary))
    }

    fn suggested_label(&self, now: NaiveDateTime) -> String {
        suggest_label(now, &board_label(&self.boards, self.board_id.as_deref()))
    }

    fn refresh_suggested_label(&mut self) {
        if self.label.is_empty() || self.label.starts_with("Game ") {
            self.label = self.suggested_label(Local::now().naive_local());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StatusKind;
    use crate::domain::{GameSummary, LeaderboardResponse, PlayerDetailResponse};
    use anyhow::anyhow;
    use std::cell::RefCell;

    enum Reply {
        Summary(GameSummary),
        Offline,
    }

    struct FakeApi {
        reply: Reply,
        boards: Vec<Board>,
        active_board: Option<String>,
        sent: RefCell<Vec<GameSubmission>>,
    }

    impl FakeApi {
        fn replying(reply: Reply) -> Self {
            Self {
                reply,
                boards: vec![
                    Board { id: "spring".into(), label: "Spring Season".into() },
                    Board { id: "alltime".into(), label: "All Time".into() },
                ],
                active_board: None,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl LeaderboardApi for FakeApi {
        async fn fetch_leaderboard(&self, _board: Option<&str>) -> Result<LeaderboardResponse> {
            Ok(LeaderboardResponse {
                ok: true,
                players: Vec::new(),
                boards: self.boards.clone(),
                active_board: self.active_board.clone(),
                error: None,
            })
        }

        async fn fetch_player(&self, _player_id: i64, _board: Option<&str>) -> Result<PlayerDetailResponse> {
            Err(anyhow!("not used"))
        }

        async fn submit_game(&self, submission: &GameSubmission) -> Result<GameSummary> {
            self.sent.borrow_mut().push(submission.clone());
            match &self.reply {
                Reply::Summary(summary) => Ok(summary.clone()),
                Reply::Offline => Err(anyhow!("connection refused")),
            }
        }
    }

    fn form(reply: Reply) -> ResultForm<FakeApi> {
        ResultForm::new(
            FakeApi::replying(reply),
            ScoringSettings::default(),
            Some("letmein".to_string()),
        )
    }

    fn accepted() -> Reply {
        Reply::Summary(GameSummary {
            ok: true,
            applied: vec!["AceHigh (+200)".into(), "RiverQueen (+150)".into()],
            board: Some("alltime".into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_placements_skip_blank_rows() {
        let mut form = form(accepted());
        form.set_nickname(1, " AceHigh ").unwrap();
        form.set_nickname(3, "   ").unwrap();
        form.set_nickname(4, "LuckyChip").unwrap();
        assert!(form.set_nickname(10, "Ghost").is_err());

        let placements = form.placements();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0], Placement { rank: 1, nickname: "AceHigh".into(), points: Some(200) });
        assert_eq!(placements[1], Placement { rank: 4, nickname: "LuckyChip".into(), points: Some(100) });
    }

    #[tokio::test]
    async fn test_validation_before_sending() {
        let mut form = form(accepted());
        assert_eq!(form.submit().await, StatusMessage::error(NO_RESULTS));

        form.set_nickname(1, "AceHigh").unwrap();
        form.select_board("");
        assert_eq!(form.submit().await, StatusMessage::error(NO_BOARD));

        let mut locked = ResultForm::new(FakeApi::replying(accepted()), ScoringSettings::default(), None);
        locked.set_nickname(1, "AceHigh").unwrap();
        assert_eq!(locked.submit().await, StatusMessage::error(PASSCODE_REQUIRED));

        assert!(form.api.sent.borrow().is_empty());
        assert!(locked.api.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submission_resets_rows() {
        let mut form = form(accepted());
        form.set_label("Friday final");
        form.set_nickname(1, "AceHigh").unwrap();
        form.set_nickname(2, "RiverQueen").unwrap();

        let status = form.submit().await;
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(
            status.text,
            "AceHigh (+200), RiverQueen (+150). Saved to All Time. Leaderboard recalculated."
        );
        assert!(form.placements().is_empty());
        assert!(form.label().starts_with("Game "));

        let sent = form.api.sent.borrow();
        assert_eq!(sent[0].label, "Friday final");
        assert_eq!(sent[0].passcode.as_deref(), Some("letmein"));
        assert_eq!(sent[0].board_id.as_deref(), Some("alltime"));
    }

    #[tokio::test]
    async fn test_rejected_passcode_is_forgotten() {
        let mut form = form(Reply::Summary(GameSummary {
            error: Some("Invalid passcode".into()),
            code: Some("PASSCODE".into()),
            ..Default::default()
        }));
        form.set_nickname(1, "AceHigh").unwrap();

        assert_eq!(form.submit().await, StatusMessage::error(INVALID_PASSCODE));
        assert!(!form.has_passcode());
        assert_eq!(form.submit().await, StatusMessage::error(PASSCODE_REQUIRED));
    }

    #[tokio::test]
    async fn test_failures_are_reported() {
        let mut form = form(Reply::Summary(GameSummary {
            errors: vec!["Invalid rank for Ghost".into()],
            ..Default::default()
        }));
        form.set_nickname(1, "Ghost").unwrap();
        let status = form.submit().await;
        assert!(status.is_error());
        assert_eq!(status.text, "No updates applied. Issues: Invalid rank for Ghost");
        assert_eq!(form.placements().len(), 1);

        let mut offline = ResultForm::new(
            FakeApi::replying(Reply::Offline),
            ScoringSettings::default(),
            Some("letmein".to_string()),
        );
        offline.set_nickname(1, "AceHigh").unwrap();
        assert_eq!(offline.submit().await, StatusMessage::error(NETWORK_ERROR));
    }

    #[tokio::test]
    async fn test_board_change_refreshes_suggested_label_only() {
        let mut form = form(accepted());
        form.load_boards().await;
        assert_eq!(form.board_id(), Some("spring"));
        assert!(form.label().ends_with("– Spring Season"));

        form.select_board("alltime");
        assert!(form.label().ends_with("– All Time"));

        form.set_label("Charity night");
        form.select_board("spring");
        assert_eq!(form.label(), "Charity night");
    }

    #[tokio::test]
    async fn test_load_boards_follows_active_board() {
        let mut api = FakeApi::replying(accepted());
        api.boards.reverse();
        api.active_board = Some("spring".to_string());
        let mut form = ResultForm::new(api, ScoringSettings::default(), Some("letmein".to_string()));

        form.load_boards().await;
        assert_eq!(form.board_id(), Some("spring"));
        assert!(form.label().ends_with("– Spring Season"));

        form.api.active_board = Some("gone".to_string());
        form.load_boards().await;
        assert_eq!(form.board_id(), Some("alltime"));
    }
}
