//! # Authentication
//!
//! Credentials applied to every request an [`ApiClient`](crate::http::ApiClient)
//! sends. reqres.in reads an optional `x-api-key` header.

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Header reqres.in reads its API key from.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    #[default]
    None,
    ApiKey {
        header: String,
        value: String,
    },
}

impl Auth {
    pub fn api_key(value: impl Into<String>) -> Self {
        Auth::ApiKey {
            header: API_KEY_HEADER.to_string(),
            value: value.into(),
        }
    }

    pub(crate) fn apply(&self, req_builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        match self {
            Auth::None => Ok(req_builder),
            Auth::ApiKey { header, value } => {
                let key = header.trim();
                if key.is_empty() {
                    return Err(Error::Auth("API key name cannot be empty".to_string()));
                }

                let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: key.to_string(),
                    reason: e.to_string(),
                })?;
                let header_value = HeaderValue::from_str(value.trim()).map_err(|e| Error::InvalidHeader {
                    name: key.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(req_builder.header(header_name, header_value))
            }
        }
    }
}
