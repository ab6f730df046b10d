use std::env;
use std::path::PathBuf;

use crate::config::{
    ProberConfig, DEFAULT_API_URL, DEFAULT_QUERY_INTERVAL, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_WORKSPACE,
};

fn env_string(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    env_string(lookup, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ProberConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolution against an arbitrary variable source, so tests never touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = env_string(&lookup, "ESPROBER_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        // 間隔與逾時下限為 1 秒；duration 0 表示不設期限
        let query_interval =
            env_f64(&lookup, "ESPROBER_QUERY_INTERVAL", DEFAULT_QUERY_INTERVAL).max(1.0);
        let request_timeout =
            env_f64(&lookup, "ESPROBER_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT).max(1.0);
        let test_duration = match env_f64(&lookup, "ESPROBER_TEST_DURATION", 0.0).max(0.0) {
            d if d > 0.0 => Some(d),
            _ => None,
        };

        Self {
            api_url,
            api_key: env_string(&lookup, "ESPROBER_API_KEY"),
            query_interval,
            test_duration,
            request_timeout,
            workspace: env_string(&lookup, "ESPROBER_WORKSPACE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE)),
            csv_file: env_string(&lookup, "ESPROBER_CSV_FILENAME").map(PathBuf::from),
            log_file: env_string(&lookup, "ESPROBER_LOG_FILENAME").map(PathBuf::from),
            queries_file: None,
            verbose: false,
            monitor: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = ProberConfig::from_lookup(|_| None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.query_interval, DEFAULT_QUERY_INTERVAL);
        assert_eq!(config.test_duration, None);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.workspace, PathBuf::from(DEFAULT_WORKSPACE));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = ProberConfig::from_lookup(lookup_from(&[(
            "ESPROBER_API_URL",
            "https://es.example.com:9200/",
        )]));
        assert_eq!(config.api_url, "https://es.example.com:9200");
    }

    #[test]
    fn test_blank_api_key_treated_as_absent() {
        let config = ProberConfig::from_lookup(lookup_from(&[("ESPROBER_API_KEY", "   ")]));
        assert_eq!(config.api_key, None);

        let config = ProberConfig::from_lookup(lookup_from(&[("ESPROBER_API_KEY", " abc ")]));
        assert_eq!(config.api_key, Some("abc".to_string()));
    }

    #[test]
    fn test_interval_clamped_to_one_second() {
        let config =
            ProberConfig::from_lookup(lookup_from(&[("ESPROBER_QUERY_INTERVAL", "0.01")]));
        assert_eq!(config.query_interval, 1.0);
    }

    #[test]
    fn test_zero_duration_means_unbounded() {
        let config = ProberConfig::from_lookup(lookup_from(&[("ESPROBER_TEST_DURATION", "0")]));
        assert_eq!(config.test_duration, None);

        let config = ProberConfig::from_lookup(lookup_from(&[("ESPROBER_TEST_DURATION", "90")]));
        assert_eq!(config.test_duration, Some(90.0));
    }

    #[test]
    fn test_unparsable_number_falls_back_to_default() {
        let config =
            ProberConfig::from_lookup(lookup_from(&[("ESPROBER_REQUEST_TIMEOUT", "soon")]));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_explicit_output_files_respected() {
        let config = ProberConfig::from_lookup(lookup_from(&[
            ("ESPROBER_CSV_FILENAME", "/var/log/probe.csv"),
            ("ESPROBER_LOG_FILENAME", "/var/log/probe.log"),
        ]));
        assert_eq!(config.csv_path(), PathBuf::from("/var/log/probe.csv"));
        assert_eq!(config.log_path(), PathBuf::from("/var/log/probe.log"));
    }
}
