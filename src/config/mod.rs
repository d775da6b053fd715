use crate::auth::Auth;

pub const DEFAULT_BASE_URL: &str = "https://reqres.in";

/// Where the checks run and how they authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn auth(&self) -> Auth {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Auth::api_key(key),
            _ => Auth::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_reqres() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://reqres.in");
        assert_eq!(config.auth(), Auth::None);
    }

    #[test]
    fn blank_api_key_means_no_auth() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert_eq!(config.auth(), Auth::None);
    }

    #[test]
    fn api_key_becomes_header_auth() {
        let config = Config {
            api_key: Some("reqres-free-v1".into()),
            ..Config::default()
        };
        assert_eq!(config.auth(), Auth::api_key("reqres-free-v1"));
    }
}
