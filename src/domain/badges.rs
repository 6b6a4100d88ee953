use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::fields::first_text;
use super::models::Badge;

pub const MAX_BADGES: usize = 8;
pub const DEFAULT_ICON: &str = "🏅";

const ICON_KEYS: &[&str] = &["icon", "emoji"];
const LABEL_KEYS: &[&str] = &["label", "text", "title"];

/// A badge is either a bare string or an object with loosely named fields.
/// Anything else is ignored.
pub fn sanitize_badge(raw: &Value) -> Option<Badge> {
    match raw {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| Badge {
                icon: text.to_string(),
                label: text.to_string(),
            })
        }
        Value::Object(object) => {
            let icon = first_text(object, ICON_KEYS)
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string());
            let label = first_text(object, LABEL_KEYS).unwrap_or_else(|| icon.clone());
            Some(Badge { icon, label })
        }
        _ => None,
    }
}

pub fn sanitize_badges(raw: &[Value]) -> Vec<Badge> {
    raw.iter()
        .filter_map(sanitize_badge)
        .take(MAX_BADGES)
        .collect()
}

pub fn deserialize_badges<'de, D>(deserializer: D) -> Result<Vec<Badge>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(sanitize_badges(&items)),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Vec<Badge> {
        sanitize_badges(value.as_array().unwrap())
    }

    #[test]
    fn test_string_and_object_badges() {
        let badges = parse(json!([
            " 🔥 ",
            {"emoji": "🏆", "title": "Champion"},
            {"label": "No icon"},
            {"icon": "🦈"},
            "",
            null,
            42
        ]));

        assert_eq!(
            badges,
            vec![
                Badge { icon: "🔥".into(), label: "🔥".into() },
                Badge { icon: "🏆".into(), label: "Champion".into() },
                Badge { icon: DEFAULT_ICON.into(), label: "No icon".into() },
                Badge { icon: "🦈".into(), label: "🦈".into() },
            ]
        );
    }

    #[test]
    fn test_objects_with_both_field_names() {
        let badges = parse(json!([
            {"icon": "🏆", "emoji": "🥇", "label": "Champ", "title": "Other"},
            {"icon": null, "emoji": "🌊", "label": null, "text": "River Master"}
        ]));

        assert_eq!(
            badges,
            vec![
                Badge { icon: "🏆".into(), label: "Champ".into() },
                Badge { icon: "🌊".into(), label: "River Master".into() },
            ]
        );
    }

    #[test]
    fn test_badges_capped() {
        let many: Vec<String> = (0..12).map(|i| format!("b{i}")).collect();
        let badges = parse(json!(many));
        assert_eq!(badges.len(), MAX_BADGES);
        assert_eq!(badges[7].label, "b7");
    }

    #[test]
    fn test_missing_or_null_list() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "deserialize_badges")]
            badges: Vec<Badge>,
        }

        let holder: Holder = serde_json::from_value(json!({"badges": null})).unwrap();
        assert!(holder.badges.is_empty());
        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.badges.is_empty());
    }
}
