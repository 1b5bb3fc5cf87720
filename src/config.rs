//! Configuration file structures for the tictac client.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed by `TICTAC_`, nested keys being separated
//! by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! server:
//!   # Base URL of the game server
//!   url: "http://localhost:8080"
//!   # Transport timeout in seconds for every request
//!   timeout: 10
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export TICTAC_SERVER__URL="http://game.example.com"
//! export TICTAC_SERVER__TIMEOUT=5
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the file.
const ENV_PREFIX: &str = "TICTAC_";

/// Root configuration structure.
///
/// Every field has a default, so a missing file yields a working
/// configuration pointing at a local server.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Game server configuration
    #[serde(default)]
    pub server: Server,
}

/// Game server configuration.
///
/// # YAML Section
///
/// ```yaml
/// server:
///   url: "http://localhost:8080"
///   timeout: 10
/// ```
#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct Server {
    /// Base URL of the game server.
    ///
    /// Should include the protocol (http/https). Trailing slashes are removed
    /// on load.
    ///
    /// # Examples
    ///
    /// - `http://localhost:8080`
    /// - `https://tictactoe.example.com`
    #[serde(default = "default_url")]
    pub url: String,

    /// Transport timeout in seconds.
    ///
    /// A request exceeding it is reported as a connectivity failure. The
    /// controller itself never times out a request.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_timeout() -> u64 {
    10
}

impl Config {
    /// Loads the configuration from `path`, then applies environment overrides.
    ///
    /// A missing file is not an error: defaults and environment apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not valid YAML or a value has the
    /// wrong type.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let config = Config::load("config.yaml")?;
    /// println!("Server: {}", config.server.url);
    /// ```
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        let mut config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        // Normalize URL by removing trailing slashes
        let trimmed_len = config.server.url.trim_end_matches('/').len();
        config.server.url.truncate(trimmed_len);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let file = write_config("server:\n  url: \"http://game.example.com/\"\n  timeout: 3\n");

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.server.url, "http://game.example.com");
        assert_eq!(config.server.timeout, 3);
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let config = Config::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.server.url, "http://localhost:8080");
        assert_eq!(config.server.timeout, 10);
    }

    #[test]
    #[serial]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config("server:\n  timeout: 30\n");

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.server.url, "http://localhost:8080");
        assert_eq!(config.server.timeout, 30);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let file = write_config("server:\n  url: \"http://game.example.com\"\n  timeout: 3\n");

        // Tests touching the environment are serialized
        unsafe {
            std::env::set_var("TICTAC_SERVER__URL", "http://override.example.com");
        }
        let config = Config::load(file.path().to_str().unwrap());
        unsafe {
            std::env::remove_var("TICTAC_SERVER__URL");
        }

        let config = config.unwrap();
        assert_eq!(config.server.url, "http://override.example.com");
        assert_eq!(config.server.timeout, 3);
    }

    #[test]
    #[serial]
    fn test_load_invalid_value() {
        let file = write_config("server:\n  timeout: \"soon\"\n");

        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
