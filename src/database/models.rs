use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub nickname: String,
    pub slogan: String,
    pub avatar_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub delta: i64,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct BadgeRow {
    pub player_id: i64,
    pub icon: String,
    pub label: String,
}

// DTOs for joined queries
#[derive(Debug, Clone)]
pub struct PlayerStanding {
    pub player_id: i64,
    pub nickname: String,
    pub total_points: i64,
    pub finals_played: i64,
    pub slogan: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nickname: Option<String>,
    pub slogan: Option<String>,
    /// `Some(None)` clears the avatar.
    pub avatar_url: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.slogan.is_none() && self.avatar_url.is_none()
    }
}
