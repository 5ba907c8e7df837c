// ABOUTME: Configuration loading for the namerecords service.
// ABOUTME: Reads environment variables once at startup; every setting has a default.

use std::fmt;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_API_TOKEN: &str = "dummy-api-token";
pub const DEFAULT_DATABASE_URL: &str = "namerecords.db";
pub const DEFAULT_TEST_DATABASE_URL: &str = "namerecords-test.db";

/// Deployment environment. Controls error verbosity and default log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Filter used for the tracing subscriber when RUST_LOG is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => {
                "namerecords=debug,namerecords_server=debug,namerecords_store=debug,namerecords_core=debug,tower_http=debug"
            }
            Environment::Test => "warn",
            Environment::Production => {
                "namerecords=info,namerecords_server=info,namerecords_store=info,namerecords_core=info,tower_http=info"
            }
        }
    }
}

impl Environment {
    /// Recognized environment names, case-insensitive. `None` for anything else.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "test" => Some(Environment::Test),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable service configuration snapshot.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub environment: Environment,
    pub api_token: String,
    pub database_url: String,
    pub test_database_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::default(),
            api_token: DEFAULT_API_TOKEN.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            test_database_url: DEFAULT_TEST_DATABASE_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// Environment variables:
    /// - PORT: listen port (default: 8000)
    /// - NAMERECORDS_ENV, or NODE_ENV: development | test | production (default: development)
    /// - API_TOKEN: bearer token required on every request (default: dummy-api-token)
    /// - DATABASE_URL, or DB_URL: operational database (default: namerecords.db)
    /// - TEST_DATABASE_URL, or TEST_DB_URL: database used when the environment is test
    ///
    /// Never fails: an unparseable port or unknown environment name is logged
    /// and replaced by its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match env_var(&["PORT"]) {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = defaults.port, "PORT is not a valid port number, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        let environment = match env_var(&["NAMERECORDS_ENV", "NODE_ENV"]) {
            Some(raw) => Environment::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown environment name, using development");
                Environment::Development
            }),
            None => defaults.environment,
        };

        Self {
            port,
            environment,
            api_token: env_var(&["API_TOKEN"]).unwrap_or(defaults.api_token),
            database_url: env_var(&["DATABASE_URL", "DB_URL"]).unwrap_or(defaults.database_url),
            test_database_url: env_var(&["TEST_DATABASE_URL", "TEST_DB_URL"])
                .unwrap_or(defaults.test_database_url),
        }
    }

    /// The connection string for the current environment.
    pub fn active_database_url(&self) -> &str {
        match self.environment {
            Environment::Test => &self.test_database_url,
            _ => &self.database_url,
        }
    }
}

/// First non-empty value among the given variable names.
fn env_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that manipulate process-wide env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "PORT",
        "NAMERECORDS_ENV",
        "NODE_ENV",
        "API_TOKEN",
        "DATABASE_URL",
        "DB_URL",
        "TEST_DATABASE_URL",
        "TEST_DB_URL",
    ];

    /// SAFETY: Only call while holding ENV_MUTEX.
    unsafe fn clear_env() {
        // SAFETY: caller holds ENV_MUTEX, ensuring no concurrent env var access
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn config_loads_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: holding ENV_MUTEX
        unsafe { clear_env() };

        let config = ServiceConfig::from_env();

        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api_token, "dummy-api-token");
        assert_eq!(config.database_url, "namerecords.db");
        assert_eq!(config.test_database_url, "namerecords-test.db");
        assert_eq!(config.active_database_url(), "namerecords.db");
    }

    #[test]
    fn config_reads_env_and_fallback_names() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: holding ENV_MUTEX
        unsafe {
            clear_env();
            std::env::set_var("PORT", "9001");
            std::env::set_var("NODE_ENV", "test");
            std::env::set_var("API_TOKEN", "secret");
            std::env::set_var("DB_URL", "ops.db");
            std::env::set_var("TEST_DATABASE_URL", ":memory:");
        }

        let config = ServiceConfig::from_env();

        // SAFETY: holding ENV_MUTEX
        unsafe { clear_env() };

        assert_eq!(config.port, 9001);
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.database_url, "ops.db");
        assert_eq!(config.active_database_url(), ":memory:");
    }

    #[test]
    fn primary_env_name_wins_over_fallback() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: holding ENV_MUTEX
        unsafe {
            clear_env();
            std::env::set_var("NAMERECORDS_ENV", "production");
            std::env::set_var("NODE_ENV", "test");
        }

        let config = ServiceConfig::from_env();

        // SAFETY: holding ENV_MUTEX
        unsafe { clear_env() };

        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: holding ENV_MUTEX
        unsafe {
            clear_env();
            std::env::set_var("API_TOKEN", "");
            std::env::set_var("PORT", "");
        }

        let config = ServiceConfig::from_env();

        // SAFETY: holding ENV_MUTEX
        unsafe { clear_env() };

        assert_eq!(config.api_token, DEFAULT_API_TOKEN);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        // SAFETY: holding ENV_MUTEX
        unsafe {
            clear_env();
            std::env::set_var("PORT", "eighty");
            std::env::set_var("NODE_ENV", "staging");
        }

        let config = ServiceConfig::from_env();

        // SAFETY: holding ENV_MUTEX
        unsafe { clear_env() };

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.environment.is_production());
        assert_eq!(config.active_database_url(), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name("Production"), Some(Environment::Production));
        assert_eq!(Environment::from_name("dev"), Some(Environment::Development));
        assert_eq!(Environment::from_name("staging"), None);
        assert!(Environment::Production.is_production());
        assert!(!Environment::Test.is_production());
        assert_eq!(Environment::Test.to_string(), "test");
    }
}
