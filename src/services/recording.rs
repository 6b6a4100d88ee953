use anyhow::Result;
use log::{info, warn};
use rusqlite::Connection;
use serde_json::Value;

use crate::config::settings::ScoringSettings;
use crate::database::{history, players};
use crate::domain::scoring::{self, ScoredPlacement};
use crate::domain::GameSummary;

/// Applies game results to the database
pub struct RecordingService<'a> {
    scoring: &'a ScoringSettings,
}

impl<'a> RecordingService<'a> {
    pub fn new(scoring: &'a ScoringSettings) -> Self {
        Self { scoring }
    }

    /// Records every valid placement in one transaction. Invalid entries are
    /// reported in `errors` and do not stop the rest. The board must exist.
    pub fn record(
        &self,
        conn: &Connection,
        board_id: &str,
        label: Option<&str>,
        placements: &[Value],
    ) -> Result<GameSummary> {
        let label = scoring::resolve_label(label, &self.scoring.default_label);
        let (accepted, errors) = scoring::resolve_placements(placements, &label, self.scoring);

        for error in &errors {
            warn!("Rejected placement in '{}': {}", label, error);
        }

        let applied = self.apply(conn, board_id, &accepted)?;
        info!(
            "Recorded '{}' on board {}: {} applied, {} rejected",
            label,
            board_id,
            applied.len(),
            errors.len()
        );

        Ok(GameSummary {
            ok: !applied.is_empty(),
            applied,
            errors,
            board: Some(board_id.to_string()),
            ..Default::default()
        })
    }

    fn apply(&self, conn: &Connection, board_id: &str, accepted: &[ScoredPlacement]) -> Result<Vec<String>> {
        if accepted.is_empty() {
            return Ok(Vec::new());
        }

        let tx = conn.unchecked_transaction()?;
        let mut applied = Vec::with_capacity(accepted.len());

        for placement in accepted {
            let player = players::find_or_create(
                &tx,
                &placement.nickname,
                &placement.slogan,
                placement.avatar_url.as_deref(),
            )?;
            history::insert_entry(&tx, player.id, board_id, placement.delta, &placement.reason)?;
            applied.push(scoring::applied_line(&placement.nickname, placement.delta));
        }

        tx.commit()?;
        Ok(applied)
    }
}
