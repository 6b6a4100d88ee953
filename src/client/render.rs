use colored::Colorize;
use std::fmt::Write;

use super::viewer::{LeaderboardRow, PlayerPanel};
use super::{StatusKind, StatusMessage};
use crate::domain::format::format_points;

const NICKNAME_WIDTH: usize = 24;

/// Leaderboard table for the terminal
pub fn render_leaderboard(board_label: &str, rows: &[LeaderboardRow<'_>], total_players: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", board_label.bold());

    if rows.is_empty() {
        let message = if total_players == 0 {
            "No players yet."
        } else {
            "No players match your search."
        };
        let _ = writeln!(out, "{}", message.dimmed());
        return out;
    }

    let _ = writeln!(
        out,
        "{:>4}  {:<width$}  {:>10}  {:>6}  {}",
        "#",
        "Player",
        "Points",
        "Finals",
        "Badges",
        width = NICKNAME_WIDTH
    );
    for row in rows {
        let player = row.player;
        let badges: Vec<&str> = player.badges.iter().map(|b| b.icon.as_str()).collect();
        let line = format!(
            "{:>4}  {:<width$}  {:>10}  {:>6}  {}",
            row.rank,
            player.nickname,
            format_points(player.total_points),
            player.finals_played,
            badges.join(" "),
            width = NICKNAME_WIDTH
        );
        let line = match row.rank {
            1 => line.yellow().bold(),
            2 | 3 => line.bold(),
            _ => line.normal(),
        };
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "{} of {} players", rows.len(), total_players);
    out
}

pub fn render_panel(panel: &PlayerPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {} pts", panel.nickname.bold(), panel.points);
    let _ = writeln!(out, "{}", panel.slogan.italic());
    let _ = writeln!(out, "{}", panel.finals);
    if !panel.badges.is_empty() {
        let _ = writeln!(out, "{}", panel.badges.join("  "));
    }
    if let Some(url) = &panel.avatar_url {
        let _ = writeln!(out, "{}", url.dimmed());
    }

    let _ = writeln!(out, "{}", "Recent history".underline());
    if let Some(message) = panel.empty_history {
        let _ = writeln!(out, "{}", message.dimmed());
    }
    for line in &panel.history {
        let delta = if line.delta.starts_with('-') {
            line.delta.red()
        } else {
            line.delta.green()
        };
        let _ = writeln!(out, "{:>6}  {}  {}", delta, line.reason, line.when.dimmed());
    }
    out
}

pub fn render_status(status: &StatusMessage) -> String {
    match status.kind {
        StatusKind::Success => status.text.green().to_string(),
        StatusKind::Error => status.text.red().to_string(),
    }
}
