use crate::client::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use crate::error::ClientError;
use crate::time_of_day::HeuristicMode;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Flight-search API connection settings
    pub client: ClientConfig,

    /// Ranking rules: historical (`legacy`) or `corrected`
    pub heuristic: HeuristicMode,

    /// Default log level when RUST_LOG is unset
    pub log_level: String,

    /// JSON log lines instead of pretty output
    pub json_logs: bool,
}

impl AppConfig {
    /// Load configuration from the environment, reading a `.env` file first if present
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ClientError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let api_key = get("DUFFEL_API_KEY")
            .ok_or_else(|| ClientError::ConfigError("DUFFEL_API_KEY not set".to_string()))?;

        let timeout_ms: u64 = match get("DUFFEL_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|_| {
                ClientError::ConfigError(format!("DUFFEL_TIMEOUT_MS is not a number: {}", raw))
            })?,
            None => 30_000,
        };

        let page_size = get("DUFFEL_PAGE_SIZE")
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(50)
            .clamp(1, MAX_PAGE_SIZE);

        let heuristic = match get("OFFER_HEURISTIC") {
            Some(raw) => raw.parse().map_err(ClientError::ConfigError)?,
            None => HeuristicMode::default(),
        };

        Ok(Self {
            client: ClientConfig {
                base_url: get("DUFFEL_API_URL").unwrap_or(DEFAULT_BASE_URL).to_string(),
                api_key: api_key.to_string(),
                api_version: get("DUFFEL_API_VERSION")
                    .unwrap_or(DEFAULT_API_VERSION)
                    .to_string(),
                timeout_ms,
                page_size,
            },
            heuristic,
            log_level: get("LOG_LEVEL").unwrap_or("info").to_string(),
            json_logs: get("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json")),
        })
    }
}
