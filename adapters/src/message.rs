//! Extraction of human-readable messages from failed responses.
//!
//! The backend is inconsistent about where it puts the text: a JSON object
//! with `detalles`, `mensaje` or `message`, a `message` that is itself a
//! JSON document serialized to a string, or a bare text body.

use serde_json::Value;

const KEYS: [&str; 3] = ["detalles", "mensaje", "message"];
const PLACEHOLDER: &str = "No message available";

/// Returns the best server message contained in a raw response body.
pub fn extract(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return from_value(&value);
        }
    }

    clean(trimmed)
}

/// Returns the best server message contained in a decoded JSON body.
pub fn from_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => KEYS.iter().find_map(|key| {
            let text = map.get(*key)?.as_str()?;
            if *key == "message" && text.trim_start().starts_with('{') {
                match serde_json::from_str::<Value>(text) {
                    Ok(nested) => from_value(&nested),
                    Err(_) => clean(text),
                }
            } else {
                clean(text)
            }
        }),
        Value::String(text) => extract(text),
        _ => None,
    }
}

fn clean(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text == PLACEHOLDER {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_detalles_over_mensaje() {
        let body = r#"{"mensaje":"Error","detalles":"Usuario bloqueado tras 3 intentos"}"#;
        assert_eq!(
            extract(body).as_deref(),
            Some("Usuario bloqueado tras 3 intentos")
        );
    }

    #[test]
    fn parses_json_nested_in_message() {
        let value = json!({
            "status": 401,
            "message": "{\"mensaje\":\"Credenciales inválidas\",\"intentosRestantes\":2}"
        });
        assert_eq!(from_value(&value).as_deref(), Some("Credenciales inválidas"));
    }

    #[test]
    fn keeps_plain_text_bodies() {
        assert_eq!(extract("  Área no encontrada ").as_deref(), Some("Área no encontrada"));
    }

    #[test]
    fn placeholder_and_empty_count_as_absent() {
        assert_eq!(extract(""), None);
        assert_eq!(extract(r#"{"message":"No message available"}"#), None);
        assert_eq!(extract(r#"{"error":"Bad Request"}"#), None);
    }

    #[test]
    fn broken_json_falls_back_to_text() {
        assert_eq!(extract("{no es json").as_deref(), Some("{no es json"));
    }
}
