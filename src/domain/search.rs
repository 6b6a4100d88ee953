use super::models::PlayerSummary;

/// Case-insensitive substring match on nicknames. A blank term keeps everyone.
pub fn filter_by_nickname(players: &[PlayerSummary], term: &str) -> Vec<PlayerSummary> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return players.to_vec();
    }

    players
        .iter()
        .filter(|player| player.nickname.to_lowercase().contains(&term))
        .cloned()
        .collect()
}
