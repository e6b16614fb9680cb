//! Token signing settings, loaded once at start-up.

use core_config::{ConfigError, FromEnv, env_parse, env_required};

const MIN_SECRET_LEN: usize = 32;
const DEFAULT_TTL_DAYS: i64 = 30;
const MAX_TTL_DAYS: i64 = 365;

/// JWT signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_TTL_DAYS` (optional) - token lifetime in days, 1 to 365, defaults to 30
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidValue {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }
        if !(1..=MAX_TTL_DAYS).contains(&ttl_days) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_DAYS".to_string(),
                details: format!("must be between 1 and {MAX_TTL_DAYS} (got {ttl_days})"),
            });
        }

        Ok(Self { secret, ttl_days })
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        let ttl_days = env_parse("JWT_TTL_DAYS", DEFAULT_TTL_DAYS)?;
        Self::new(secret, ttl_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_from_env_defaults_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_DAYS", None)],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.ttl_days, 30);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_custom_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_DAYS", Some("7"))],
            || {
                assert_eq!(JwtConfig::from_env().unwrap().ttl_days, 7);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_rejects_short_secret() {
        let err = JwtConfig::new("short", 30).unwrap_err();
        assert!(err.to_string().contains("32 characters"));
    }

    #[test]
    fn test_jwt_config_rejects_out_of_range_ttl() {
        assert!(JwtConfig::new(SECRET, 365).is_ok());

        let err = JwtConfig::new(SECRET, 366).unwrap_err();
        assert!(err.to_string().contains("JWT_TTL_DAYS"));

        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_TTL_DAYS", Some("9223372036854775807")),
            ],
            || {
                assert!(JwtConfig::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_jwt_config_rejects_zero_ttl() {
        let err = JwtConfig::new(SECRET, 0).unwrap_err();
        assert!(err.to_string().contains("JWT_TTL_DAYS"));
    }
}
