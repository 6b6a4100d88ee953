use serde_json::{Map, Value};

/// Text of the first key that is present and not null. Numbers and booleans
/// are stringified; any other value ends the lookup with `None`.
pub fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let value = keys
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())?;

    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_first_present_key_wins() {
        let map = object(json!({"id": "spring", "value": "autumn", "slug": null}));
        assert_eq!(first_text(&map, &["id", "value"]).as_deref(), Some("spring"));
        assert_eq!(first_text(&map, &["slug", "value"]).as_deref(), Some("autumn"));
        assert_eq!(first_text(&map, &["name"]), None);
    }

    #[test]
    fn test_scalar_conversion() {
        let map = object(json!({"id": 7, "flag": true, "label": " Spring ", "nested": {"a": 1}}));
        assert_eq!(first_text(&map, &["id"]).as_deref(), Some("7"));
        assert_eq!(first_text(&map, &["flag"]).as_deref(), Some("true"));
        assert_eq!(first_text(&map, &["label"]).as_deref(), Some("Spring"));
        assert_eq!(first_text(&map, &["nested", "label"]), None);
    }
}
