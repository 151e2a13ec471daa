use crate::state::pagination::{DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
use cfb_api::client::Session;
use log::LevelFilter;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "http://localhost:8081/api/v1";

pub const ENV_API_URL: &str = "CFBTUI_API_URL";
pub const ENV_TOKEN: &str = "CFBTUI_TOKEN";
pub const ENV_ROWS_PER_PAGE: &str = "CFBTUI_ROWS_PER_PAGE";
pub const ENV_LOG: &str = "CFBTUI_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub token: Option<String>,
    pub rows_per_page: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank and unparseable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let rows_per_page = value(ENV_ROWS_PER_PAGE)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| ROWS_PER_PAGE_OPTIONS.contains(n))
            .unwrap_or(defaults.rows_per_page);

        Self {
            full_screen: false,
            log_level: value(ENV_LOG).and_then(|v| LevelFilter::from_str(&v).ok()),
            api_url: value(ENV_API_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            token: value(ENV_TOKEN),
            rows_per_page,
        }
    }

    pub fn session(&self) -> Session {
        let session = Session::new(self.api_url.clone());
        match &self.token {
            Some(token) => session.with_token(token.clone()),
            None => session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings(&[]);
        assert_eq!(s.api_url, DEFAULT_API_URL);
        assert_eq!(s.token, None);
        assert_eq!(s.rows_per_page, 10);
        assert_eq!(s.log_level, None);
        assert_eq!(s.session(), Session::new(DEFAULT_API_URL));
    }

    #[test]
    fn reads_every_variable() {
        let s = settings(&[
            (ENV_API_URL, "https://league.example/api/v1/"),
            (ENV_TOKEN, "abc"),
            (ENV_ROWS_PER_PAGE, "25"),
            (ENV_LOG, "debug"),
        ]);
        assert_eq!(s.api_url, "https://league.example/api/v1");
        assert_eq!(s.rows_per_page, 25);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.session().token.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_unsupported_page_sizes_and_blank_tokens() {
        let s = settings(&[(ENV_ROWS_PER_PAGE, "13"), (ENV_TOKEN, "  "), (ENV_LOG, "loud")]);
        assert_eq!(s.rows_per_page, DEFAULT_ROWS_PER_PAGE);
        assert_eq!(s.token, None);
        assert_eq!(s.log_level, None);
    }
}
