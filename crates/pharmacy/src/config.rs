use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PRESCRIBER: &str = "Dr. Abhishek Shelke";

/// Runtime settings read from the environment.
///
/// Call `dotenvy::dotenv()` before [`Config::from_env`] to pick up a `.env` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the medicines/orders API.
    pub api_url: String,
    /// Address the order desk listens on.
    pub listen_addr: String,
    /// Name shown in the order sheet header.
    pub prescriber: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            prescriber: DEFAULT_PRESCRIBER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: String| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };

        Self {
            api_url: read("API_URL", defaults.api_url),
            listen_addr: read("LISTEN_ADDR", defaults.listen_addr),
            prescriber: read("ORDER_PRESCRIBER", defaults.prescriber),
        }
    }
}
