/*
 * Responsibility
 * - Load settings from the environment (JWT secret, DATABASE_URL, CORS, timeouts)
 * - Validate them (startup fails when something required is missing)
 * - Decide the identity strategy once (live store vs. demo roster)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for clock-skew tolerance on `exp` (one day).
pub const MAX_ACCESS_TOKEN_LEEWAY_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    /// Unset or unrecognised values resolve to `Production`, so the demo
    /// roster is only reachable when a non-production env is named explicitly.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("development" | "dev") => Self::Development,
            Some("test") => Self::Test,
            _ => Self::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Where identities come from. Chosen here and nowhere else.
#[derive(Clone, PartialEq, Eq)]
pub enum IdentitySource {
    Live { database_url: String },
    Demo,
}

impl fmt::Debug for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // connection strings carry credentials
        match self {
            Self::Live { .. } => f.write_str("Live"),
            Self::Demo => f.write_str("Demo"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: String,
    pub access_token_leeway_seconds: u64,

    pub identity_source: IdentitySource,
    pub identity_lookup_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("identity_source", &self.identity_source)
            .field("identity_lookup_timeout", &self.identity_lookup_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs <= MAX_ACCESS_TOKEN_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
        };

        let identity_lookup_timeout = lookup("IDENTITY_LOOKUP_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(5));

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let identity_source = match database_url {
            Some(database_url) => IdentitySource::Live { database_url },
            None if !app_env.is_production() => IdentitySource::Demo,
            None => return Err(ConfigError::Missing("DATABASE_URL")),
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            access_token_leeway_seconds,
            identity_source,
            identity_lookup_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_secret_refuses_to_start() {
        let err = Config::from_lookup(lookup_from(&[("APP_ENV", "development")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn blank_secret_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "development"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("JWT_SECRET"));
    }

    #[test]
    fn demo_strategy_needs_explicit_non_production_env() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "test"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();
        assert_eq!(config.identity_source, IdentitySource::Demo);

        // APP_ENV unset counts as production
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn database_url_selects_live_strategy_even_in_development() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "dev"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/pickups"),
        ]))
        .unwrap();
        assert_eq!(
            config.identity_source,
            IdentitySource::Live {
                database_url: "postgres://localhost/pickups".into()
            }
        );
        assert!(!format!("{:?}", config).contains("postgres://"));
    }

    #[test]
    fn leeway_beyond_one_day_is_rejected() {
        for raw in ["86401", "9223372036854775808", "18446744073709551615", "soon"] {
            let err = Config::from_lookup(lookup_from(&[
                ("APP_ENV", "development"),
                ("JWT_SECRET", "s3cret"),
                ("ACCESS_TOKEN_LEEWAY_SECONDS", raw),
            ]))
            .unwrap_err();
            assert_eq!(err, ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"), "{raw}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "development"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_LEEWAY_SECONDS", "86400"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_leeway_seconds, MAX_ACCESS_TOKEN_LEEWAY_SECONDS);
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "development"),
            ("JWT_SECRET", "s3cret"),
            ("IDENTITY_LOOKUP_TIMEOUT_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.access_token_leeway_seconds, 0);
        assert_eq!(config.identity_lookup_timeout, Duration::from_secs(5));
        assert!(config.cors_allowed_origins.is_empty());
    }
}
