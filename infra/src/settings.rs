//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults for the detected environment
//! 2. `config.<environment>.toml` in the working directory, if present
//! 3. The file passed to [`load`], if any
//! 4. `JR_*` environment variables, `__` separating sections
//!    (e.g. `JR_SESSION__EXPIRES_KEY_IN=30m`, `JR_CACHE__URL=redis://...`)
//!
//! `.env` and then `.env.<environment>` are read into the process
//! environment first. Variables already set are never overwritten.

use config::{Config, Environment as EnvSource, File};
use std::path::Path;
use tracing::debug;

use jr_shared::config::{AppConfig, Environment, LoggingConfig};

use crate::InfrastructureError;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "JR";

pub fn load(path: Option<&Path>) -> Result<AppConfig, InfrastructureError> {
    let environment = load_env_files(Path::new("."));

    let defaults = AppConfig {
        environment,
        logging: LoggingConfig::for_environment(environment),
        ..AppConfig::default()
    };

    let mut builder = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false));

    if let Some(path) = path {
        debug!("Loading configuration from {}", path.display());
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(
        EnvSource::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Reads `.env`, detects the environment, then reads its own env file
fn load_env_files(dir: &Path) -> Environment {
    dotenvy::from_path(dir.join(".env")).ok();
    let environment = Environment::from_env();

    let env_file = dir.join(environment.env_file());
    if dotenvy::from_path(&env_file).is_ok() {
        debug!("Loaded environment file {}", env_file.display());
    }
    environment
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.session.prefix.is_empty() {
        return Err(InfrastructureError::Config(
            "session.prefix must not be empty".to_string(),
        ));
    }
    if config.cache.url.is_empty() {
        return Err(InfrastructureError::Config("cache.url must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jr_shared::TimeSpan;
    use std::path::PathBuf;

    fn write_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jr-settings-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_environment_env_file_is_loaded() {
        let dir = std::env::temp_dir().join(format!("jr-dotenv-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let environment = Environment::from_env();
        std::fs::write(
            dir.join(environment.env_file()),
            "DOTENV_MARKER_JR_SETTINGS=loaded\n",
        )
        .unwrap();

        assert_eq!(load_env_files(&dir), environment);
        assert_eq!(
            std::env::var("DOTENV_MARKER_JR_SETTINGS").as_deref(),
            Ok("loaded")
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_defaults() {
        let config = load(None).unwrap();
        assert!(!config.session.prefix.is_empty());
        assert!(!config.cache.url.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = write_config(
            r#"
[session]
prefix = "auth:"
expires_key_in = "30 minutes"

[cache]
url = "redis://cache.internal:6380"
database = 2
"#,
        );

        let config = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.session.prefix, "auth:");
        assert_eq!(
            config.session.expires_key_in,
            Some(TimeSpan::Text("30 minutes".to_string()))
        );
        assert_eq!(config.cache.url, "redis://cache.internal:6380");
        assert_eq!(config.cache.database, 2);
    }

    #[test]
    fn test_numeric_expiry_from_file() {
        let path = write_config("[session]\nexpires_key_in = 900\n");

        let config = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.session.expires_key_in, Some(TimeSpan::Seconds(900)));
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let path = write_config("[session]\nprefix = \"\"\n");

        let result = load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("jr-settings-does-not-exist.toml");
        assert!(load(Some(&path)).is_err());
    }
}
