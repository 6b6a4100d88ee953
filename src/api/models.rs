use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Badge, Board};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameRequest {
    pub label: Option<String>,
    pub placements: Option<Value>,
    pub passcode: Option<String>,
    #[serde(alias = "board")]
    pub board_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePlayerRequest {
    pub nickname: Option<String>,
    pub slogan: Option<String>,
    pub avatar_url: Option<String>,
    pub passcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BadgeRequest {
    pub player_id: Option<i64>,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub passcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BoardRequest {
    pub id: Option<String>,
    pub label: Option<String>,
    pub passcode: Option<String>,
}

#[derive(Serialize)]
pub struct PlayerCreated {
    pub ok: bool,
    pub player_id: i64,
}

#[derive(Serialize)]
pub struct ProfileUpdated {
    pub ok: bool,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct BadgeAwarded {
    pub ok: bool,
    pub player_id: i64,
    pub badge: Badge,
}

#[derive(Serialize)]
pub struct BoardCreated {
    pub ok: bool,
    pub board: Board,
}

#[derive(Serialize)]
pub struct ScoreRecorded {
    pub ok: bool,
    pub player_id: i64,
    pub board: String,
    pub delta: i64,
}
