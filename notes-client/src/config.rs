use std::env;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Base URL of the notes collection server (serves `/notes`).
    pub const API_URL: &str = "NOTES_API_URL";
    /// Base URL of the analysis server (serves `/invoke`).
    /// Falls back to NOTES_API_URL when unset.
    pub const ANALYSIS_URL: &str = "NOTES_ANALYSIS_URL";
    /// Per-request timeout in seconds. Unset or 0 = no timeout.
    pub const REQUEST_TIMEOUT_SECS: &str = "NOTES_REQUEST_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const API_URL: &str = "http://localhost:5000";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub analysis_url: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(env_vars::API_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::API_URL.to_string());
        let api_url = normalize_base_url(&api_url);

        let analysis_url = lookup(env_vars::ANALYSIS_URL)
            .filter(|s| !s.trim().is_empty())
            .map(|s| normalize_base_url(&s))
            .unwrap_or_else(|| api_url.clone());

        let request_timeout = match lookup(env_vars::REQUEST_TIMEOUT_SECS) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    format!(
                        "{} must be a whole number of seconds, got {:?}: {}",
                        env_vars::REQUEST_TIMEOUT_SECS,
                        raw,
                        e
                    )
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            api_url,
            analysis_url,
            request_timeout,
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, defaults::API_URL);
        assert_eq!(config.analysis_url, defaults::API_URL);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_analysis_url_falls_back_to_api_url() {
        let config =
            Config::from_lookup(lookup(&[(env_vars::API_URL, "http://notes.internal:32000/")]))
                .unwrap();
        assert_eq!(config.api_url, "http://notes.internal:32000");
        assert_eq!(config.analysis_url, "http://notes.internal:32000");
    }

    #[test]
    fn test_separate_analysis_url() {
        let config = Config::from_lookup(lookup(&[
            (env_vars::API_URL, "http://notes.internal"),
            (env_vars::ANALYSIS_URL, "http://llm.internal/"),
        ]))
        .unwrap();
        assert_eq!(config.analysis_url, "http://llm.internal");
    }

    #[test]
    fn test_timeout_parsing() {
        let config =
            Config::from_lookup(lookup(&[(env_vars::REQUEST_TIMEOUT_SECS, "30")])).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));

        let config =
            Config::from_lookup(lookup(&[(env_vars::REQUEST_TIMEOUT_SECS, "0")])).unwrap();
        assert_eq!(config.request_timeout, None);

        let err = Config::from_lookup(lookup(&[(env_vars::REQUEST_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.contains(env_vars::REQUEST_TIMEOUT_SECS));
    }
}
