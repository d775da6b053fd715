use std::collections::HashMap;
use std::time::Instant;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Url;
use tracing::debug;

use crate::auth::Auth;
use crate::config::Config;
use crate::error::{Error, Result};

use super::request::ApiRequest;
use super::response::ApiResponse;

/// Sends single requests against a fixed base URL.
///
/// No retries and no timeout beyond reqwest's defaults: a failing call
/// surfaces as an error so the check that made it fails.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| Error::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        // `Url::join` drops the last segment of a path without a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            auth: Auth::None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.base_url)?.with_auth(config.auth()))
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix the base URL
    /// carries, and adds the request's query pairs.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let relative = request.path.trim_start_matches('/');
        let mut url = self.base_url.join(relative).map_err(|e| Error::InvalidUrl {
            url: format!("{}{}", self.base_url, request.path),
            reason: e.to_string(),
        })?;

        if !request.query.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, %url, "sending request");

        let mut req_builder = self.http.request(request.method.into(), url);
        req_builder = apply_headers(req_builder, &request.headers)?;
        req_builder = self.auth.apply(req_builder)?;

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let started = Instant::now();
        let response = req_builder.send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let text = response.text().await?;
        let elapsed = started.elapsed();

        debug!(status, elapsed_ms = elapsed.as_millis() as u64, "received response");
        ApiResponse::from_parts(status, headers, text, elapsed)
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            (name.to_string(), value.to_string())
        })
        .collect()
}

fn apply_headers(
    mut req_builder: reqwest::RequestBuilder,
    headers: &[(String, String)],
) -> Result<reqwest::RequestBuilder> {
    for (key, value) in headers {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidHeader {
                name: key.to_string(),
                reason: "header key is empty".to_string(),
            });
        }

        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: key.to_string(),
            reason: e.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value.trim()).map_err(|e| Error::InvalidHeader {
            name: key.to_string(),
            reason: e.to_string(),
        })?;
        req_builder = req_builder.header(header_name, header_value);
    }

    Ok(req_builder)
}
