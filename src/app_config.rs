//! Application configuration loading for CLI defaults.
//!
//! Values come from an optional TOML file and `TOOLBELT_*` environment
//! variables (environment wins). Command-line flags override both.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use toolbelt::download::Pacing;
use toolbelt::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// Environment variable prefix for overrides (`TOOLBELT_MIN_DELAY_MS`, ...).
pub const ENV_PREFIX: &str = "TOOLBELT";

const MAX_DELAY_MS: u64 = 600_000;

/// File/environment configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Lower bound of the pause between downloads in milliseconds.
    pub min_delay_ms: Option<u64>,
    /// Upper bound of the pause between downloads in milliseconds.
    pub max_delay_ms: Option<u64>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Database credentials file.
    pub creds_path: Option<PathBuf>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        validate_delay_ms("min_delay_ms", self.min_delay_ms)?;
        validate_delay_ms("max_delay_ms", self.max_delay_ms)?;
        if let (Some(min), Some(max)) = (self.min_delay_ms, self.max_delay_ms)
            && min > max
        {
            bail!("Invalid config: `min_delay_ms` ({min}) is greater than `max_delay_ms` ({max})");
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }

    /// Connect timeout, falling back to the library default.
    #[must_use]
    pub fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS)
    }

    /// Read timeout, falling back to the library default.
    #[must_use]
    pub fn read_timeout_secs(&self) -> u64 {
        self.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS)
    }

    /// Resolves the download pacing from flags first, then config, then defaults.
    #[must_use]
    pub fn pacing(&self, flag_min_ms: Option<u64>, flag_max_ms: Option<u64>, no_delay: bool) -> Pacing {
        if no_delay {
            return Pacing::disabled();
        }
        let defaults = Pacing::default();
        let min = flag_min_ms
            .or(self.min_delay_ms)
            .map_or(defaults.min(), Duration::from_millis);
        let max = flag_max_ms
            .or(self.max_delay_ms)
            .map_or(defaults.max(), Duration::from_millis);
        Pacing::new(min, max)
    }
}

fn validate_delay_ms(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value > MAX_DELAY_MS {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 0..={MAX_DELAY_MS}");
    }
    Ok(())
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Effective values (defaults when nothing was configured).
    pub config: FileConfig,
    /// Indicates whether a config file was read from disk.
    pub loaded_from_file: bool,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/toolbelt/config.toml`
/// 2. `$HOME/.config/toolbelt/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("toolbelt").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("toolbelt")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path (if present) and the process environment.
pub fn load_default_config() -> Result<LoadedConfig> {
    load_config(
        resolve_default_config_path(),
        Environment::with_prefix(ENV_PREFIX),
    )
}

fn load_config(path: Option<PathBuf>, environment: Environment) -> Result<LoadedConfig> {
    let file = path.as_deref().filter(|p| p.is_file());
    let loaded_from_file = file.is_some();

    let mut builder = Config::builder();
    if let Some(file) = file {
        builder = builder.add_source(File::from(file).format(FileFormat::Toml));
    }
    let settings = builder
        .add_source(environment.try_parsing(true))
        .build()
        .with_context(|| config_context(file))?;

    let config: FileConfig = settings
        .try_deserialize()
        .with_context(|| config_context(file))?;
    config.validate()?;

    Ok(LoadedConfig {
        path,
        config,
        loaded_from_file,
    })
}

fn config_context(file: Option<&Path>) -> String {
    match file {
        Some(path) => format!("Failed to load config file '{}'", path.display()),
        None => "Failed to load config from environment".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use config::Map;
    use tempfile::TempDir;

    use super::*;

    fn no_env() -> Environment {
        Environment::with_prefix("TOOLBELT_TEST_UNSET").source(Some(Map::new()))
    }

    fn env_with(pairs: &[(&str, &str)]) -> Environment {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<Map<_, _>>();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = load_config(Some(temp.path().join("absent.toml")), no_env()).unwrap();
        assert!(!loaded.loaded_from_file);
        assert_eq!(loaded.config, FileConfig::default());
        assert_eq!(loaded.config.connect_timeout_secs(), CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn test_file_values_are_read() {
        let (_temp, path) = write_config(
            "min_delay_ms = 100\nmax_delay_ms = 200\nread_timeout_secs = 9\ncreds_path = \"etc/creds.ini\"\n",
        );
        let loaded = load_config(Some(path), no_env()).unwrap();
        assert!(loaded.loaded_from_file);
        assert_eq!(loaded.config.min_delay_ms, Some(100));
        assert_eq!(loaded.config.max_delay_ms, Some(200));
        assert_eq!(loaded.config.read_timeout_secs(), 9);
        assert_eq!(loaded.config.creds_path, Some(PathBuf::from("etc/creds.ini")));
    }

    #[test]
    fn test_environment_overrides_file() {
        let (_temp, path) = write_config("min_delay_ms = 100\nmax_delay_ms = 200\n");
        let loaded = load_config(
            Some(path),
            env_with(&[("TOOLBELT_MAX_DELAY_MS", "900")]),
        )
        .unwrap();
        assert_eq!(loaded.config.min_delay_ms, Some(100));
        assert_eq!(loaded.config.max_delay_ms, Some(900));
    }

    #[test]
    fn test_out_of_range_delay_rejected() {
        let (_temp, path) = write_config("max_delay_ms = 600001\n");
        let err = load_config(Some(path), no_env()).unwrap_err();
        assert!(err.to_string().contains("max_delay_ms"), "{err}");
    }

    #[test]
    fn test_min_above_max_rejected() {
        let config = FileConfig {
            min_delay_ms: Some(5_000),
            max_delay_ms: Some(1_000),
            ..FileConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FileConfig {
            connect_timeout_secs: Some(0),
            ..FileConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("1..=3600"), "{err}");
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let (_temp, path) = write_config("min_delay_ms = \"soon\"\n");
        let err = load_config(Some(path), no_env()).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"), "{err:#}");
    }

    #[test]
    fn test_pacing_precedence() {
        let config = FileConfig {
            min_delay_ms: Some(10),
            max_delay_ms: Some(20),
            ..FileConfig::default()
        };

        let from_file = config.pacing(None, None, false);
        assert_eq!(from_file.min(), Duration::from_millis(10));
        assert_eq!(from_file.max(), Duration::from_millis(20));

        let from_flags = config.pacing(Some(1), Some(2), false);
        assert_eq!(from_flags.max(), Duration::from_millis(2));

        assert!(config.pacing(Some(1), Some(2), true).is_disabled());

        let defaults = FileConfig::default().pacing(None, None, false);
        assert_eq!(defaults, Pacing::default());
    }
}
