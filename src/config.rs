//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::console::Route;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_LOG_FILE: &str = "algo-quiz.log";
pub const DEFAULT_LANGUAGE: &str = "py";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Terminal console for the algorithm catalog and its quizzes", long_about = None)]
pub struct ConsoleArgs {
    /// Base URL of the catalog API
    #[arg(long, env = "ALGOQUIZ_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File receiving the console log
    #[arg(long, env = "ALGOQUIZ_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Language of solution code, as a file extension
    #[arg(long, env = "ALGOQUIZ_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Page to open first, e.g. /algoritmos/novo
    #[arg(long, default_value = "/algoritmos")]
    pub route: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid API URL {url:?}: {reason}")]
    ApiUrl { url: String, reason: String },

    #[error("unknown route {0:?}")]
    Route(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub log_file: PathBuf,
    pub language: String,
    pub start_route: Route,
}

impl Config {
    pub fn from_args(args: ConsoleArgs) -> Result<Self, ConfigError> {
        let api_url = validate_api_url(&args.api_url)?;
        let start_route = args
            .route
            .parse()
            .map_err(|_| ConfigError::Route(args.route.clone()))?;

        Ok(Self {
            api_url,
            log_file: args.log_file,
            language: args.language.trim_start_matches('.').to_string(),
            start_route,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            language: DEFAULT_LANGUAGE.to_string(),
            start_route: Route::List,
        }
    }
}

fn validate_api_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::ApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> ConsoleArgs {
        let mut argv = vec!["algo-quiz"];
        argv.extend_from_slice(extra);
        ConsoleArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(args(&["--api-url", DEFAULT_API_URL])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.start_route, Route::List);
        assert_eq!(config.language, "py");
    }

    #[test]
    fn test_trailing_slash_and_route() {
        let config = Config::from_args(args(&[
            "--api-url",
            "https://catalog.example/api/v1/",
            "--route",
            "/quiz/4",
            "--language",
            ".rs",
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://catalog.example/api/v1");
        assert_eq!(config.start_route, Route::Quiz(4));
        assert_eq!(config.language, "rs");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_args(args(&["--api-url", "localhost:8000"])),
            Err(ConfigError::ApiUrl { .. })
        ));
        assert!(matches!(
            Config::from_args(args(&["--api-url", "ftp://host/api"])),
            Err(ConfigError::ApiUrl { .. })
        ));
        assert!(matches!(
            Config::from_args(args(&["--api-url", DEFAULT_API_URL, "--route", "/sobre"])),
            Err(ConfigError::Route(_))
        ));
    }
}
