use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::fields::first_text;
use super::models::Board;
use crate::config::{DEFAULT_BOARD_ID, DEFAULT_BOARD_LABEL};

pub const NO_BOARD_LABEL: &str = "All players";

const ID_KEYS: &[&str] = &["id", "value", "slug"];
const LABEL_KEYS: &[&str] = &["label", "name", "title"];

/// Board from a backend that may name its fields `value`/`slug` and
/// `name`/`title`. Entries without an id are dropped.
pub fn normalize_board(raw: &Value) -> Option<Board> {
    let object = raw.as_object()?;
    let id = first_text(object, ID_KEYS).filter(|id| !id.is_empty())?;
    let label = first_text(object, LABEL_KEYS)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| id.clone());
    Some(Board { id, label })
}

pub fn normalize_boards(raw: &[Value]) -> Vec<Board> {
    raw.iter().filter_map(normalize_board).collect()
}

/// Anything other than a list yields no boards.
pub fn deserialize_boards<'de, D>(deserializer: D) -> Result<Vec<Board>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(normalize_boards(&items)),
        _ => Ok(Vec::new()),
    }
}

/// Picks the board to show: suggested, then current, then the first one.
/// A preferred id that is not in the list falls back to the first board.
pub fn choose_active(boards: &[Board], suggested: Option<&str>, current: Option<&str>) -> Option<String> {
    let first = boards.first()?;
    let preferred = suggested
        .filter(|id| !id.is_empty())
        .or(current.filter(|id| !id.is_empty()))
        .unwrap_or(first.id.as_str());

    if boards.iter().any(|board| board.id == preferred) {
        Some(preferred.to_string())
    } else {
        Some(first.id.clone())
    }
}

/// Display label for a board id.
pub fn board_label(boards: &[Board], board_id: Option<&str>) -> String {
    let board_id = board_id.map(str::trim).unwrap_or_default();
    if let Some(board) = boards.iter().find(|board| board.id == board_id) {
        return board.label.trim().to_string();
    }
    if board_id.is_empty() || board_id == DEFAULT_BOARD_ID {
        return DEFAULT_BOARD_LABEL.to_string();
    }
    board_id.to_string()
}

/// Board list used when the backend cannot be reached.
pub fn fallback_boards() -> Vec<Board> {
    vec![Board {
        id: DEFAULT_BOARD_ID.to_string(),
        label: DEFAULT_BOARD_LABEL.to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn boards() -> Vec<Board> {
        vec![
            Board { id: "alltime".into(), label: "All Time".into() },
            Board { id: "spring".into(), label: "Spring Season".into() },
        ]
    }

    #[test]
    fn test_normalize_lenient_fields() {
        let raw = json!([
            {"value": "spring", "name": "Spring"},
            {"slug": "autumn"},
            {"title": "No id"},
            {"id": "  "},
            {"id": "summer", "label": "Summer"},
            {"id": 2024, "title": "Season 2024"},
            "winter",
            null
        ]);

        let ids: Vec<_> = normalize_boards(raw.as_array().unwrap())
            .into_iter()
            .map(|b| (b.id, b.label))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("spring".to_string(), "Spring".to_string()),
                ("autumn".to_string(), "autumn".to_string()),
                ("summer".to_string(), "Summer".to_string()),
                ("2024".to_string(), "Season 2024".to_string()),
            ]
        );
    }

    #[test]
    fn test_boards_with_both_field_names() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_boards")]
            boards: Vec<Board>,
        }

        let holder: Holder = serde_json::from_value(json!({
            "boards": [
                {"id": "spring", "value": "ignored", "label": "Spring", "name": "Other"},
                {"id": null, "value": "autumn", "label": null, "name": "Autumn"}
            ]
        }))
        .unwrap();
        assert_eq!(
            holder.boards,
            vec![
                Board { id: "spring".into(), label: "Spring".into() },
                Board { id: "autumn".into(), label: "Autumn".into() },
            ]
        );

        let holder: Holder = serde_json::from_value(json!({"boards": {"id": "spring"}})).unwrap();
        assert!(holder.boards.is_empty());
    }

    #[test]
    fn test_choose_active_preference_order() {
        let boards = boards();
        assert_eq!(choose_active(&boards, Some("spring"), Some("alltime")).as_deref(), Some("spring"));
        assert_eq!(choose_active(&boards, None, Some("spring")).as_deref(), Some("spring"));
        assert_eq!(choose_active(&boards, Some(""), None).as_deref(), Some("alltime"));
        assert_eq!(choose_active(&boards, Some("gone"), Some("spring")).as_deref(), Some("alltime"));
        assert_eq!(choose_active(&[], Some("spring"), None), None);
    }

    #[test]
    fn test_board_label_fallbacks() {
        let boards = boards();
        assert_eq!(board_label(&boards, Some("spring")), "Spring Season");
        assert_eq!(board_label(&[], Some("alltime")), "All Time");
        assert_eq!(board_label(&[], None), "All Time");
        assert_eq!(board_label(&[], Some("winter ")), "winter");
    }
}
