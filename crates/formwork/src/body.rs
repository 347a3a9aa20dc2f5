// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Submitted payload parsing.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Submitted values in payload order.
pub type Payload = IndexMap<String, JsonValue>;

/// Errors that can occur while parsing a submitted body.
#[derive(Debug, thiserror::Error)]
pub enum BodyParseError {
    /// The body is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// The JSON body is not an object.
    #[error("JSON body must be an object")]
    NotAnObject,
    /// The multipart body is malformed.
    #[error("Invalid multipart data: {0}")]
    InvalidMultipart(String),
}

/// Parses a posted body into a payload according to its content type.
///
/// Bodies without a recognized content type are tried as urlencoded data.
pub fn parse_payload(body: &[u8], content_type: Option<&str>) -> Result<Payload, BodyParseError> {
    let content_type = content_type.unwrap_or("");

    if body.is_empty() {
        return Ok(Payload::new());
    }

    if content_type.contains("application/json") {
        return parse_json(body);
    }

    if content_type.contains("multipart/form-data") {
        return parse_multipart_basic(body, content_type);
    }

    Ok(parse_form_urlencoded(body))
}

fn parse_json(bytes: &[u8]) -> Result<Payload, BodyParseError> {
    match serde_json::from_slice(bytes).map_err(|e| BodyParseError::InvalidJson(e.to_string()))? {
        JsonValue::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(BodyParseError::NotAnObject),
    }
}

fn parse_form_urlencoded(bytes: &[u8]) -> Payload {
    let mut payload = Payload::new();
    for (key, value) in form_urlencoded::parse(bytes) {
        push_value(&mut payload, &key, value.into_owned());
    }
    payload
}

/// Adds a submitted value. `name[]` keys and repeated keys collect into an
/// array under the bare name, as checkbox groups submit them.
fn push_value(payload: &mut Payload, key: &str, value: String) {
    let (name, is_list) = match key.strip_suffix("[]") {
        Some(name) => (name, true),
        None => (key, false),
    };

    match payload.get_mut(name) {
        Some(JsonValue::Array(items)) => items.push(JsonValue::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = JsonValue::Array(vec![first, JsonValue::String(value)]);
        }
        None if is_list => {
            payload.insert(name.to_string(), JsonValue::Array(vec![JsonValue::String(value)]));
        }
        None => {
            payload.insert(name.to_string(), JsonValue::String(value));
        }
    }
}

fn parse_multipart_basic(bytes: &[u8], content_type: &str) -> Result<Payload, BodyParseError> {
    let boundary = content_type
        .split(';')
        .find(|s| s.trim().starts_with("boundary="))
        .and_then(|s| s.trim().strip_prefix("boundary="))
        .ok_or_else(|| BodyParseError::InvalidMultipart("Missing boundary".to_string()))?;

    let boundary = boundary.trim_matches('"');
    let delimiter = format!("--{}", boundary);

    let body_str = String::from_utf8_lossy(bytes);
    let mut payload = Payload::new();

    for part in body_str.split(&delimiter) {
        if part.trim().is_empty() || part.starts_with("--") {
            continue;
        }

        if let Some(idx) = part.find("\r\n\r\n") {
            let headers_str = &part[..idx];
            let content = part[idx + 4..].trim_end_matches("\r\n");

            if let Some(name) = extract_form_field_name(headers_str) {
                if !headers_str.contains("filename=") {
                    push_value(&mut payload, name, content.to_string());
                }
            }
        }
    }

    Ok(payload)
}

fn extract_form_field_name(headers: &str) -> Option<&str> {
    for line in headers.lines() {
        if line.to_lowercase().starts_with("content-disposition:") {
            if let Some(name_part) = line.split(';').find(|s| s.trim().starts_with("name=")) {
                let name = name_part.trim().strip_prefix("name=")?;
                return Some(name.trim_matches('"'));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencoded_keeps_order() {
        let payload = parse_payload(
            b"__form-name__=contact&name=Ada+L&email=ada%40example.com",
            Some("application/x-www-form-urlencoded"),
        )
        .unwrap();
        let keys: Vec<_> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["__form-name__", "name", "email"]);
        assert_eq!(payload["name"], "Ada L");
        assert_eq!(payload["email"], "ada@example.com");
    }

    #[test]
    fn test_json_object() {
        let payload = parse_payload(br#"{"name": "Ada", "n": 3}"#, Some("application/json")).unwrap();
        assert_eq!(payload["n"], 3);
        assert!(matches!(
            parse_payload(b"[1]", Some("application/json")),
            Err(BodyParseError::NotAnObject)
        ));
    }

    #[test]
    fn test_multipart_skips_files() {
        let body = "--XX\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nAda\r\n\
                    --XX\r\nContent-Disposition: form-data; name=\"cv\"; filename=\"cv.pdf\"\r\n\r\n%PDF\r\n\
                    --XX--\r\n";
        let payload = parse_payload(body.as_bytes(), Some("multipart/form-data; boundary=XX")).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload["name"], "Ada");
    }

    #[test]
    fn test_repeated_and_bracketed_keys_collect() {
        let payload = parse_payload(
            b"tags%5B%5D=a&tags%5B%5D=b&color=red&color=blue&one%5B%5D=x&name=Ada",
            None,
        )
        .unwrap();

        assert_eq!(payload["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(payload["color"], serde_json::json!(["red", "blue"]));
        assert_eq!(payload["one"], serde_json::json!(["x"]));
        assert_eq!(payload["name"], "Ada");
        assert!(!payload.contains_key("tags[]"));
    }

    #[test]
    fn test_multipart_checkbox_group() {
        let body = "--XX\r\nContent-Disposition: form-data; name=\"days[]\"\r\n\r\nmon\r\n\
                    --XX\r\nContent-Disposition: form-data; name=\"days[]\"\r\n\r\ntue\r\n\
                    --XX--\r\n";
        let payload = parse_payload(body.as_bytes(), Some("multipart/form-data; boundary=XX")).unwrap();
        assert_eq!(payload["days"], serde_json::json!(["mon", "tue"]));
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_payload(b"", None).unwrap().is_empty());
    }
}
