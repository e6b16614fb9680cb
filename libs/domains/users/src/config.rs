//! Password hashing settings.

use argon2::{Algorithm, Argon2, Params, Version};
use core_config::{ConfigError, FromEnv, env_parse};

const DEFAULT_HASH_ROUNDS: u32 = 2;

/// Argon2id cost parameters.
///
/// - `PASSWORD_HASH_ROUNDS` (optional) - Argon2 time cost, defaults to 2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub hash_rounds: u32,
}

impl PasswordConfig {
    pub fn new(hash_rounds: u32) -> Result<Self, ConfigError> {
        if hash_rounds < 1 {
            return Err(ConfigError::InvalidValue {
                key: "PASSWORD_HASH_ROUNDS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        Ok(Self { hash_rounds })
    }

    /// Hasher for new passwords.
    ///
    /// Verification reads the parameters back out of the stored PHC string, so
    /// changing the cost does not invalidate existing hashes.
    pub(crate) fn hasher(&self) -> Result<Argon2<'static>, argon2::Error> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.hash_rounds,
            Params::DEFAULT_P_COST,
            None,
        )?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_rounds: DEFAULT_HASH_ROUNDS,
        }
    }
}

impl FromEnv for PasswordConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::new(env_parse("PASSWORD_HASH_ROUNDS", DEFAULT_HASH_ROUNDS)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_config_default_rounds() {
        temp_env::with_var_unset("PASSWORD_HASH_ROUNDS", || {
            assert_eq!(PasswordConfig::from_env().unwrap().hash_rounds, 2);
        });
    }

    #[test]
    fn test_password_config_custom_rounds() {
        temp_env::with_var("PASSWORD_HASH_ROUNDS", Some("4"), || {
            assert_eq!(PasswordConfig::from_env().unwrap().hash_rounds, 4);
        });
    }

    #[test]
    fn test_password_config_rejects_garbage() {
        temp_env::with_var("PASSWORD_HASH_ROUNDS", Some("many"), || {
            assert!(PasswordConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_password_config_rejects_zero() {
        assert!(PasswordConfig::new(0).is_err());
    }
}
