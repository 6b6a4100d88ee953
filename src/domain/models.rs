use serde::{Deserialize, Serialize};

use super::badges::deserialize_badges;
use super::boards::deserialize_boards;

/// A badge shown next to a player's nickname
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub icon: String,
    pub label: String,
}

/// Named scope (season) players are ranked under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub label: String,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub finals_played: i64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub slogan: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_badges")]
    pub badges: Vec<Badge>,
}

/// Player detail shown in the side panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub finals_played: i64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub slogan: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_badges")]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A single point change in a player's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub delta: i64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub reason: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One finishing position in a submitted game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub rank: u8,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

/// Body of `POST ?resource=game`
#[derive(Debug, Clone, Serialize)]
pub struct GameSubmission {
    pub label: String,
    pub placements: Vec<Placement>,
    pub passcode: Option<String>,
    pub board_id: Option<String>,
}

// --- API Response Structures ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub ok: bool,
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
    #[serde(default, deserialize_with = "deserialize_boards")]
    pub boards: Vec<Board>,
    #[serde(rename = "activeBoard", default)]
    pub active_board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDetailResponse {
    pub ok: bool,
    #[serde(default)]
    pub player: Option<PlayerProfile>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a game submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub ok: bool,
    #[serde(default)]
    pub applied: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
