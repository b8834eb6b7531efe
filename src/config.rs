/*
 * Responsibility
 * - Load settings from the environment (.env supported via dotenvy)
 * - Validate them once at startup (missing/invalid values abort the process)
 * - Resolve the verification mode so the rest of the app never re-reads env vars
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Static secret used when none is configured outside production.
pub const DEVELOPMENT_BEARER_TOKEN: &str = "default-secret-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Static,
    Jwt,
    Hybrid,
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "jwt" | "signed" => Ok(Self::Jwt),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(ConfigError::Invalid("AUTH_MODE")),
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

/// Resolved credential settings. Each variant holds exactly what its verifier needs.
#[derive(Clone)]
pub enum AuthSettings {
    Static {
        bearer_token: String,
    },
    Jwt {
        secret_key: String,
        issuer: Option<String>,
    },
    Hybrid {
        bearer_token: String,
        secret_key: String,
        issuer: Option<String>,
    },
}

impl AuthSettings {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Static { .. } => AuthMode::Static,
            Self::Jwt { .. } => AuthMode::Jwt,
            Self::Hybrid { .. } => AuthMode::Hybrid,
        }
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets
        let issuer = match self {
            Self::Static { .. } => None,
            Self::Jwt { issuer, .. } | Self::Hybrid { issuer, .. } => issuer.as_deref(),
        };
        f.debug_struct("AuthSettings")
            .field("mode", &self.mode())
            .field("issuer", &issuer)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub auth: AuthSettings,

    // `/api/services` lister; disabled when no project is set.
    pub gcp_project: Option<String>,
    pub cloud_run_region: String,

    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let secret_key = get("JWT_SECRET_KEY");
        let mode = match get("AUTH_MODE") {
            Some(raw) => raw.parse::<AuthMode>()?,
            None if secret_key.is_some() => AuthMode::Jwt,
            None => AuthMode::Static,
        };
        let issuer = get("JWT_ISSUER");

        let require_bearer_token = || match get("BEARER_TOKEN") {
            Some(token) => Ok(token),
            None if app_env.is_production() => Err(ConfigError::Missing("BEARER_TOKEN")),
            None => {
                tracing::warn!(
                    "BEARER_TOKEN not set; using the development default (never do this in production)"
                );
                Ok(DEVELOPMENT_BEARER_TOKEN.to_string())
            }
        };
        let require_secret_key = || secret_key.clone().ok_or(ConfigError::Missing("JWT_SECRET_KEY"));

        let auth = match mode {
            AuthMode::Static => AuthSettings::Static {
                bearer_token: require_bearer_token()?,
            },
            AuthMode::Jwt => AuthSettings::Jwt {
                secret_key: require_secret_key()?,
                issuer,
            },
            AuthMode::Hybrid => AuthSettings::Hybrid {
                bearer_token: require_bearer_token()?,
                secret_key: require_secret_key()?,
                issuer,
            },
        };

        let gcp_project = get("GOOGLE_CLOUD_PROJECT").or_else(|| get("GCP_PROJECT_ID"));
        let cloud_run_region = get("CLOUD_RUN_REGION").unwrap_or_else(|| "-".to_string());

        let request_timeout_seconds = get("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            auth,
            gcp_project,
            cloud_run_region,
            request_timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_static_mode_with_development_token() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.cloud_run_region, "-");
        assert_eq!(config.request_timeout_seconds, 30);
        match config.auth {
            AuthSettings::Static { bearer_token } => {
                assert_eq!(bearer_token, DEVELOPMENT_BEARER_TOKEN)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn production_requires_bearer_token() {
        assert_eq!(
            load(&[("APP_ENV", "production")]).unwrap_err(),
            ConfigError::Missing("BEARER_TOKEN")
        );
    }

    #[test]
    fn secret_key_selects_jwt_mode() {
        let config = load(&[("JWT_SECRET_KEY", "k"), ("JWT_ISSUER", "iss")]).unwrap();
        assert_eq!(config.auth.mode(), AuthMode::Jwt);
        match config.auth {
            AuthSettings::Jwt { secret_key, issuer } => {
                assert_eq!(secret_key, "k");
                assert_eq!(issuer.as_deref(), Some("iss"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn explicit_mode_wins_and_validates_inputs() {
        let config = load(&[("AUTH_MODE", "static"), ("JWT_SECRET_KEY", "k"), ("BEARER_TOKEN", "t")])
            .unwrap();
        assert_eq!(config.auth.mode(), AuthMode::Static);

        assert_eq!(
            load(&[("AUTH_MODE", "jwt")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET_KEY")
        );
        assert_eq!(
            load(&[("AUTH_MODE", "hybrid"), ("BEARER_TOKEN", "t")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET_KEY")
        );
        assert_eq!(
            load(&[("AUTH_MODE", "oauth")]).unwrap_err(),
            ConfigError::Invalid("AUTH_MODE")
        );
    }

    #[test]
    fn empty_values_count_as_missing() {
        assert_eq!(
            load(&[("AUTH_MODE", "jwt"), ("JWT_SECRET_KEY", "  ")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET_KEY")
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_eq!(
            load(&[("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
    }

    #[test]
    fn token_tool_settings_do_not_block_startup() {
        let config = load(&[("BEARER_TOKEN", "t"), ("JWT_DEFAULT_TTL_SECONDS", "1d")]);
        assert!(config.is_ok(), "{config:?}");
    }

    #[test]
    fn debug_hides_secrets() {
        let config = load(&[
            ("AUTH_MODE", "hybrid"),
            ("BEARER_TOKEN", "static-secret-value"),
            ("JWT_SECRET_KEY", "signing-secret-value"),
        ])
        .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("static-secret-value"));
        assert!(!printed.contains("signing-secret-value"));
        assert!(printed.contains("Hybrid"));
    }
}
