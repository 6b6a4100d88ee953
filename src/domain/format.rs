use chrono::{DateTime, NaiveDateTime};

use super::models::GameSummary;

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// `1260` -> `1,260`
pub fn format_points(points: i64) -> String {
    let digits = points.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if points < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_delta(delta: i64) -> String {
    if delta >= 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Renders RFC 3339 or SQLite-style timestamps; anything else is returned as-is.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return "—".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|parsed| parsed.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Success message after a game was recorded.
pub fn format_summary(summary: &GameSummary, board_label: Option<&str>) -> String {
    let applied = if summary.applied.is_empty() {
        "Results recorded".to_string()
    } else {
        summary.applied.join(", ")
    };

    let mut message = format!("{applied}.");
    if let Some(label) = board_label.filter(|l| !l.is_empty()) {
        message.push_str(&format!(" Saved to {label}."));
    }
    if summary.errors.is_empty() {
        message.push_str(" Leaderboard recalculated.");
    } else {
        message.push_str(&format!(" Issues: {}", summary.errors.join("; ")));
    }
    message
}

/// Failure message for a rejected submission.
pub fn format_errors(summary: &GameSummary) -> String {
    if !summary.errors.is_empty() {
        return format!("No updates applied. Issues: {}", summary.errors.join("; "));
    }
    summary
        .error
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "Unable to submit game results.".to_string())
}

pub fn suggest_label(now: NaiveDateTime, board_label: &str) -> String {
    let stamp = now.format(DISPLAY_FORMAT);
    if board_label.is_empty() {
        format!("Game {stamp}")
    } else {
        format!("Game {stamp} – {board_label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(1260), "1,260");
        assert_eq!(format_points(1234567), "1,234,567");
        assert_eq!(format_points(-40), "-40");
        assert_eq!(format_points(-12000), "-12,000");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(0), "+0");
        assert_eq!(format_delta(200), "+200");
        assert_eq!(format_delta(-40), "-40");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "—");
        assert_eq!(format_timestamp(Some("2025-03-07 21:05:00")), "Mar 7, 2025, 09:05 PM");
        assert_eq!(format_timestamp(Some("2025-03-07T09:05:00")), "Mar 7, 2025, 09:05 AM");
        assert_eq!(format_timestamp(Some("2025-03-07T09:05:00+00:00")), "Mar 7, 2025, 09:05 AM");
        assert_eq!(format_timestamp(Some("last week")), "last week");
    }

    #[test]
    fn test_summary_messages() {
        let summary = GameSummary {
            ok: true,
            applied: vec!["AceHigh (+200)".into(), "RiverQueen (+150)".into()],
            ..Default::default()
        };
        assert_eq!(
            format_summary(&summary, Some("All Time")),
            "AceHigh (+200), RiverQueen (+150). Saved to All Time. Leaderboard recalculated."
        );

        let partial = GameSummary {
            ok: true,
            applied: vec![],
            errors: vec!["Invalid rank for Ace".into(), "Missing nickname in placement entry".into()],
            ..Default::default()
        };
        assert_eq!(
            format_summary(&partial, None),
            "Results recorded. Issues: Invalid rank for Ace; Missing nickname in placement entry"
        );
    }

    #[test]
    fn test_error_messages() {
        let with_errors = GameSummary {
            errors: vec!["Invalid rank for Ace".into()],
            ..Default::default()
        };
        assert_eq!(format_errors(&with_errors), "No updates applied. Issues: Invalid rank for Ace");

        let with_error = GameSummary {
            error: Some("Unknown leaderboard: winter".into()),
            ..Default::default()
        };
        assert_eq!(format_errors(&with_error), "Unknown leaderboard: winter");
        assert_eq!(format_errors(&GameSummary::default()), "Unable to submit game results.");
    }

    #[test]
    fn test_suggest_label() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(20, 30, 0)
            .unwrap();
        assert_eq!(suggest_label(now, "All Time"), "Game Mar 7, 2025, 08:30 PM – All Time");
        assert_eq!(suggest_label(now, ""), "Game Mar 7, 2025, 08:30 PM");
    }
}
