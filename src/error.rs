use thiserror::Error;

use crate::context::ContextKey;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid authentication: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response with status {status} ({content_type}) is not JSON: {source}")]
    InvalidJson {
        status: u16,
        content_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unresolved placeholder `{{{{{name}}}}}` in `{text}`")]
    UnresolvedPlaceholder { name: String, text: String },

    #[error("Context value `{0}` has not been captured by an earlier check")]
    MissingContext(ContextKey),
}
