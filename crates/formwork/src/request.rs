// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Request context handed to the engine by the host.
//!
//! The engine never parses HTTP itself; adapters build a [`FormRequest`]
//! with the current route, client address and, for posts, the raw body.

use crate::body::{parse_payload, BodyParseError, Payload};
use std::collections::HashMap;

/// Payload key carrying the name of the submitted form.
pub const FORM_NAME_FIELD: &str = "__form-name__";

/// A platform-agnostic request as seen by the form engine.
///
/// # Example
///
/// ```rust
/// use formwork::FormRequest;
///
/// let request = FormRequest::new("/contact", "POST")
///     .with_client_ip("203.0.113.7")
///     .with_body(b"__form-name__=contact&email=a%40b.c".to_vec());
/// assert_eq!(request.form_name().unwrap().as_deref(), Some("contact"));
/// ```
#[derive(Debug, Clone)]
pub struct FormRequest {
    /// Route of the page being requested (e.g. "/contact").
    pub route: String,

    /// The HTTP method (e.g. "GET", "POST").
    pub method: String,

    /// HTTP headers.
    pub headers: HashMap<String, String>,

    /// Request body (for POST).
    pub body: Option<Vec<u8>>,

    /// Network address of the client.
    pub client_ip: String,
}

impl FormRequest {
    /// Creates a new request with the given route and method.
    pub fn new(route: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            method: method.into().to_uppercase(),
            headers: HashMap::new(),
            body: None,
            client_ip: "UNKNOWN".to_string(),
        }
    }

    /// Adds headers to the request.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a body to the request.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the client address.
    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = ip.into();
        self
    }

    /// Returns the Content-Type header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the request carries posted data.
    pub fn has_posted_data(&self) -> bool {
        self.method == "POST" && self.body.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Parses the posted body into a payload.
    pub fn payload(&self) -> Result<Payload, BodyParseError> {
        match &self.body {
            Some(body) => parse_payload(body, self.content_type()),
            None => Ok(Payload::new()),
        }
    }

    /// Extracts the submitted form name, if any.
    pub fn form_name(&self) -> Result<Option<String>, BodyParseError> {
        Ok(self
            .payload()?
            .get(FORM_NAME_FIELD)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

impl Default for FormRequest {
    fn default() -> Self {
        Self::new("/", "GET")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request() {
        let req = FormRequest::new("/contact", "post");
        assert_eq!(req.route, "/contact");
        assert_eq!(req.method, "POST");
        assert!(!req.has_posted_data());
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        let req = FormRequest::new("/api", "POST")
            .with_headers([("Content-Type".into(), "application/json".into())].into());
        assert_eq!(req.content_type(), Some("application/json"));
    }

    #[test]
    fn test_json_form_name() {
        let req = FormRequest::new("/api", "POST")
            .with_headers([("content-type".into(), "application/json".into())].into())
            .with_body(br#"{"__form-name__": "signup"}"#.to_vec());
        assert!(req.has_posted_data());
        assert_eq!(req.form_name().unwrap().as_deref(), Some("signup"));
    }

    #[test]
    fn test_missing_form_name() {
        let req = FormRequest::new("/", "POST").with_body(b"email=x".to_vec());
        assert_eq!(req.form_name().unwrap(), None);
    }
}
