use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::config::settings::ScoringSettings;

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 9;

/// A placement that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlacement {
    pub nickname: String,
    pub rank: u8,
    pub delta: i64,
    pub reason: String,
    pub slogan: String,
    pub avatar_url: Option<String>,
}

/// Placement as submitted. Values are kept loose so one bad entry
/// produces an error line instead of rejecting the whole game.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlacement {
    nickname: Value,
    rank: Value,
    points: Value,
    reason: Option<String>,
    #[serde(alias = "notes")]
    slogan: Option<String>,
    avatar_url: Option<String>,
}

pub fn resolve_label(label: Option<&str>, default_label: &str) -> String {
    label
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(default_label)
        .to_string()
}

pub fn default_reason(label: &str, rank: u8) -> String {
    format!("{label} – Rank {rank}")
}

pub fn applied_line(nickname: &str, delta: i64) -> String {
    format!("{nickname} ({})", super::format::format_delta(delta))
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_nickname(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Validates one placement and works out its point delta.
pub fn resolve_placement(
    raw: &Value,
    label: &str,
    scoring: &ScoringSettings,
) -> Result<ScoredPlacement, String> {
    let raw: RawPlacement = match raw {
        Value::Object(_) => serde_json::from_value(raw.clone())
            .map_err(|_| "Malformed placement entry".to_string())?,
        _ => return Err("Malformed placement entry".to_string()),
    };

    let nickname = as_nickname(&raw.nickname);
    if nickname.is_empty() {
        return Err("Missing nickname in placement entry".to_string());
    }

    let rank = as_integer(&raw.rank)
        .and_then(|r| u8::try_from(r).ok())
        .filter(|r| (MIN_RANK..=MAX_RANK).contains(r))
        .ok_or_else(|| format!("Invalid rank for {nickname}"))?;

    let delta = match &raw.points {
        Value::Null => scoring.points_for(rank),
        points => as_integer(points),
    }
    .ok_or_else(|| format!("No point mapping for rank {rank} ({nickname})"))?;

    let reason = raw
        .reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| default_reason(label, rank));

    Ok(ScoredPlacement {
        nickname,
        rank,
        delta,
        reason,
        slogan: raw.slogan.unwrap_or_default().trim().to_string(),
        avatar_url: raw
            .avatar_url
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
    })
}

/// Resolves every placement, collecting one error line per rejected entry.
/// A nickname may appear only once per game.
pub fn resolve_placements(
    raw: &[Value],
    label: &str,
    scoring: &ScoringSettings,
) -> (Vec<ScoredPlacement>, Vec<String>) {
    let mut accepted = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for entry in raw {
        match resolve_placement(entry, label, scoring) {
            Ok(placement) if !seen.insert(placement.nickname.clone()) => {
                errors.push(format!("Duplicate entry for {}", placement.nickname));
            }
            Ok(placement) => accepted.push(placement),
            Err(error) => errors.push(error),
        }
    }

    (accepted, errors)
}
