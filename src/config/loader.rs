//! Configuration Loader
//!
//! Merges built-in defaults, an optional TOML file and prefixed environment
//! variables through the `config` crate, then validates the result.

use super::error::ConfigResult;
use super::OptiplanConfig;
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/optiplan.toml";
pub const ENV_PREFIX: &str = "OPTIPLAN";

impl OptiplanConfig {
    /// Load configuration from `path` (or the default location) and `OPTIPLAN__*` variables.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`OptiplanConfig::load`] with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> ConfigResult<Self> {
        let (file_path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        debug!(
            config_file = %file_path.display(),
            required = required,
            env_prefix = env_prefix,
            "Loading configuration"
        );

        let config: OptiplanConfig = Config::builder()
            .add_source(Config::try_from(&OptiplanConfig::default())?)
            .add_source(
                File::from(file_path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            database_url = %config.database.url,
            optimizer_program = %config.optimizer.program,
            execution_history_limit = config.execution_history_limit,
            "Configuration loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = OptiplanConfig::load_with_prefix(None, "OPTIPLAN_TEST_DEFAULTS").unwrap();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.optimizer.program, "python3");
        assert_eq!(config.execution_history_limit, 50);
    }

    #[test]
    fn test_load_merges_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
execution_history_limit = 20

[database]
url = "sqlite::memory:"

[optimizer]
program = "/opt/venv/bin/python"
args = ["main.py", "--verbose"]
"#
        )
        .unwrap();

        let config =
            OptiplanConfig::load_with_prefix(Some(file.path()), "OPTIPLAN_TEST_FILE").unwrap();
        assert_eq!(config.execution_history_limit, 20);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.optimizer.program, "/opt/venv/bin/python");
        assert_eq!(config.optimizer.args, vec!["main.py", "--verbose"]);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        std::env::set_var("OPTIPLAN_TEST_ENV__DATABASE__MAX_CONNECTIONS", "9");
        let config = OptiplanConfig::load_with_prefix(None, "OPTIPLAN_TEST_ENV").unwrap();
        std::env::remove_var("OPTIPLAN_TEST_ENV__DATABASE__MAX_CONNECTIONS");

        assert_eq!(config.database.max_connections, 9);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = OptiplanConfig::load_with_prefix(
            Some(Path::new("/nonexistent/optiplan.toml")),
            "OPTIPLAN_TEST_MISSING",
        );
        assert!(result.is_err());
    }
}
