/// Client configuration
///
/// Loaded from environment variables, with an optional `.env` file for
/// development.
///
/// # Environment Variables
///
/// - `WASTEWISE_API_URL`: REST API base URL (default: http://localhost:8080/api)
/// - `WASTEWISE_USE_MOCK_API`: use the in-memory mock backend (default: true)
/// - `WASTEWISE_SESSION_FILE`: where the session is persisted (default: .wastewise-session.json)
/// - `WASTEWISE_MOCK_MIN_DELAY_MS`: shortest simulated latency (default: 500)
/// - `WASTEWISE_MOCK_MAX_DELAY_MS`: longest simulated latency (default: 1000)
///
/// # Example
///
/// ```no_run
/// use wastewise_client::config::ClientConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = ClientConfig::from_env()?;
/// println!("Mock backend: {}", config.use_mock_api);
/// # Ok(())
/// # }
/// ```

use crate::backend::LatencyConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_SESSION_FILE: &str = ".wastewise-session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST API base URL, used when the mock is off
    pub api_url: String,

    /// Whether to use the in-memory mock backend
    pub use_mock_api: bool,

    /// Session storage file
    pub session_file: PathBuf,

    /// Mock backend latency
    pub latency: LatencyConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            use_mock_api: true,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            latency: LatencyConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("WASTEWISE_API_URL").unwrap_or(defaults.api_url);

        let use_mock_api = match env::var("WASTEWISE_USE_MOCK_API") {
            Ok(value) => parse_bool(&value).ok_or_else(|| {
                anyhow::anyhow!("WASTEWISE_USE_MOCK_API must be true or false, got {:?}", value)
            })?,
            Err(_) => defaults.use_mock_api,
        };

        let session_file = env::var("WASTEWISE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let min_delay_ms = env::var("WASTEWISE_MOCK_MIN_DELAY_MS")
            .unwrap_or_else(|_| defaults.latency.min_delay_ms.to_string())
            .parse::<u64>()?;
        let max_delay_ms = env::var("WASTEWISE_MOCK_MAX_DELAY_MS")
            .unwrap_or_else(|_| defaults.latency.max_delay_ms.to_string())
            .parse::<u64>()?;

        if min_delay_ms > max_delay_ms {
            anyhow::bail!("WASTEWISE_MOCK_MIN_DELAY_MS must not exceed WASTEWISE_MOCK_MAX_DELAY_MS");
        }

        Ok(ClientConfig {
            api_url,
            use_mock_api,
            session_file,
            latency: LatencyConfig::new(min_delay_ms, max_delay_ms),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
