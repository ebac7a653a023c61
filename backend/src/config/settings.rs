use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);
pub const MAX_WEBHOOK_TIMEOUT_SECS: u64 = 300;
pub const MAX_RESULTS_TTL_MINUTES: u64 = 24 * 60;
pub const DEFAULT_BOOKING_URL: &str =
    "https://cal.com/first-choicecyber/healthcare-practice-automation-systems";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
    pub results_ttl: Duration,
    pub frontend_url: Option<String>,
    pub environment: String,
    pub booking_url: String,
    pub sentry_dsn: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            webhook_url: None,
            webhook_timeout: Duration::from_secs(10),
            results_ttl: Duration::from_secs(30 * 60),
            frontend_url: None,
            environment: "development".to_string(),
            booking_url: DEFAULT_BOOKING_URL.to_string(),
            sentry_dsn: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Settings::default();

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.bind_addr,
        };

        let webhook_timeout = match get("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_bounded("WEBHOOK_TIMEOUT_SECS", &raw, MAX_WEBHOOK_TIMEOUT_SECS)?),
            None => defaults.webhook_timeout,
        };

        let results_ttl = match get("RESULTS_TTL_MINUTES") {
            Some(raw) => {
                let minutes = parse_bounded("RESULTS_TTL_MINUTES", &raw, MAX_RESULTS_TTL_MINUTES)?;
                Duration::from_secs(minutes * 60)
            }
            None => defaults.results_ttl,
        };

        Ok(Settings {
            bind_addr,
            webhook_url: get("LEAD_CAPTURE_WEBHOOK_URL"),
            webhook_timeout,
            results_ttl,
            frontend_url: get("FRONTEND_URL"),
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            booking_url: get("BOOKING_URL").unwrap_or(defaults.booking_url),
            sentry_dsn: get("SENTRY_DSN"),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Parses a whole number in `1..=max`.
fn parse_bounded(name: &'static str, raw: &str, max: u64) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) if n > max => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: format!("must be at most {}", max),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
