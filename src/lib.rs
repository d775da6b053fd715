//! End-to-end checks for the reqres.in REST testing service.
//!
//! Each check sends one request through [`ApiClient`], asserts on the status
//! code and body shape, and may capture a value into the [`TestContext`] for
//! a later check. [`catalog::reqres_suite`] holds the checks in run order.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod http;
pub mod testing;

pub use auth::Auth;
pub use config::Config;
pub use context::{ContextKey, TestContext};
pub use error::{Error, Result};
pub use http::{ApiClient, ApiRequest, ApiResponse, HttpMethod};
