use std::collections::HashMap;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub text: String,
    pub json: Value,
    pub elapsed: Duration,
}

impl ApiResponse {
    /// Builds a response from its raw parts. An empty body is treated as the
    /// empty JSON object; anything else must parse as JSON.
    pub fn from_parts(
        status: u16,
        headers: HashMap<String, String>,
        text: String,
        elapsed: Duration,
    ) -> Result<Self> {
        let json = parse_body(&text).map_err(|source| Error::InvalidJson {
            status,
            content_type: header_value(&headers, "content-type").unwrap_or("no content type").to_string(),
            source,
        })?;
        Ok(Self {
            status,
            headers,
            text,
            json,
            elapsed,
        })
    }

    pub fn has_empty_body(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Looks up a value by JSON pointer (`""` is the whole body).
    pub fn field(&self, pointer: &str) -> Option<&Value> {
        self.json.pointer(pointer)
    }
}

fn parse_body(text: &str) -> serde_json::Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(text)
}

fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, text: &str) -> Result<ApiResponse> {
        ApiResponse::from_parts(status, HashMap::new(), text.to_string(), Duration::ZERO)
    }

    #[test]
    fn empty_body_parses_to_empty_object() {
        let response = response(204, "").unwrap();
        assert!(response.has_empty_body());
        assert_eq!(response.json, json!({}));
    }

    #[test]
    fn field_uses_json_pointer() {
        let response = response(200, r#"{"data":{"id":2,"email":"janet.weaver@reqres.in"}}"#).unwrap();
        assert_eq!(response.field("/data/id"), Some(&json!(2)));
        assert!(response.field("/data/avatar").is_none());
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::InvalidJson { status: 502, .. }));
    }

    #[test]
    fn non_json_error_names_content_type() {
        let headers = HashMap::from([("content-type".to_string(), "text/html; charset=utf-8".to_string())]);
        let err = ApiResponse::from_parts(502, headers, "<html>Bad Gateway</html>".into(), Duration::ZERO).unwrap_err();
        assert!(err.to_string().starts_with("Response with status 502 (text/html; charset=utf-8) is not JSON"));
    }

    #[test]
    fn content_type_lookup_ignores_case() {
        let headers = HashMap::from([("Content-Type".to_string(), "text/plain".to_string())]);
        let err = ApiResponse::from_parts(500, headers, "oops".into(), Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("(text/plain)"));

        let err = response(500, "oops").unwrap_err();
        assert!(err.to_string().contains("(no content type)"));
    }
}
