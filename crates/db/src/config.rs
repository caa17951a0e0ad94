/// Default datastore: a `students.sqlite` file in the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://students.sqlite";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Datastore configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite connection URL.
    pub database_url: String,
    /// Pool size upper bound.
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                   |
    /// |----------------------|---------------------------|
    /// | `DATABASE_URL`       | `sqlite://students.sqlite`|
    /// | `DB_MAX_CONNECTIONS` | `5`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("DB_MAX_CONNECTIONS").ok(),
        )
    }

    fn from_vars(
        database_url: Option<String>,
        max_connections: Option<String>,
    ) -> Result<Self, ConfigError> {
        let database_url = database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let max_connections = match max_connections {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "DB_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_when_unset() {
        let config = DbConfig::from_vars(None, None).unwrap();
        assert_eq!(config, DbConfig::new(DEFAULT_DATABASE_URL));
    }

    #[test]
    fn reads_overrides() {
        let config = DbConfig::from_vars(
            Some("sqlite://other.sqlite".to_string()),
            Some(" 2 ".to_string()),
        )
        .unwrap();
        assert_eq!(config.database_url, "sqlite://other.sqlite");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn rejects_bad_pool_size() {
        for raw in ["zero", "0", "-1"] {
            let err = DbConfig::from_vars(None, Some(raw.to_string())).unwrap_err();
            assert_matches!(err, ConfigError::InvalidNumber { var: "DB_MAX_CONNECTIONS", .. });
        }
    }
}
