use crate::config::error::{ConfigError, Result};
use config::{Config, Environment, File};
use envguard_scorer::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root gatekeeper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Language of the blocking message and diagnostic reasons
    #[serde(default)]
    pub locale: LocaleSetting,

    /// Behaviour once the runtime has been blocked
    #[serde(default)]
    pub block: BlockConfig,

    /// Log filtering
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configured locale; `auto` follows the host locale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LocaleSetting {
    #[default]
    Auto,
    Ru,
    En,
}

impl LocaleSetting {
    pub fn resolve(self) -> Locale {
        match self {
            Self::Auto => sys_locale::get_locale()
                .map(|tag| Locale::from_tag(&tag))
                .unwrap_or_default(),
            Self::Ru => Locale::Ru,
            Self::En => Locale::En,
        }
    }
}

/// What the terminal surface does after drawing the block screen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HoldPolicy {
    /// Keep the screen up until the process is killed from outside.
    #[default]
    Forever,
    /// Linger, restore the terminal and let the caller exit.
    Exit,
}

/// Block behaviour configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConfig {
    #[serde(default)]
    pub hold: HoldPolicy,

    /// Process exit status used when startup is blocked (1-255)
    #[serde(default = "default_exit_code")]
    pub exit_code: i32,

    /// How long `hold = "exit"` keeps the screen up, in milliseconds
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
}

impl BlockConfig {
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_exit_code() -> i32 {
    3
}
fn default_linger_ms() -> u64 {
    3000
}
fn default_log_filter() -> String {
    "warn".to_string()
}

const MAX_LINGER_MS: u64 = 60_000;

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            hold: HoldPolicy::default(),
            exit_code: default_exit_code(),
            linger_ms: default_linger_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl GuardConfig {
    /// Reject values that deserialize but make no sense.
    pub fn validate(&self) -> Result<()> {
        if !(1..=255).contains(&self.block.exit_code) {
            return Err(ConfigError::ValidationError(format!(
                "block.exit_code must be between 1 and 255, got {}",
                self.block.exit_code
            )));
        }
        if self.block.linger_ms > MAX_LINGER_MS {
            return Err(ConfigError::ValidationError(format!(
                "block.linger_ms must be at most {MAX_LINGER_MS}, got {}",
                self.block.linger_ms
            )));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loader with layered merging support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration with layered merging:
    /// 1. Defaults (from Default implementations)
    /// 2. Config file if provided
    /// 3. Environment variables (ENVGUARD_ prefix)
    pub fn load(&self) -> Result<GuardConfig> {
        let mut builder = Config::builder();

        let defaults_json = serde_json::to_string(&GuardConfig::default())
            .map_err(|err| ConfigError::LoadError(err.to_string()))?;
        builder = builder.add_source(File::from_str(&defaults_json, config::FileFormat::Json));

        if let Some(ref path) = self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            tracing::debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        // Example: ENVGUARD_BLOCK__HOLD=exit
        builder = builder.add_source(
            Environment::with_prefix("ENVGUARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let guard_config: GuardConfig = builder.build()?.try_deserialize()?;
        guard_config.validate()?;
        Ok(guard_config)
    }

    /// Locate the default config file in standard locations:
    /// 1. Current directory: ./envguard.toml
    /// 2. XDG config: ~/.config/envguard/config.toml
    /// 3. Home directory: ~/.envguard.toml
    pub fn find_config_file() -> Option<PathBuf> {
        let cwd_config = PathBuf::from("./envguard.toml");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("envguard").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".envguard.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<GuardConfig> {
        let loader = match Self::find_config_file() {
            Some(config_path) => ConfigLoader::new().with_file(config_path),
            None => ConfigLoader::new(),
        };
        loader.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::env;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("envguard.toml");
        std::fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn defaults_are_valid() {
        let config = GuardConfig::default();
        assert_eq!(config.locale, LocaleSetting::Auto);
        assert_eq!(config.block.hold, HoldPolicy::Forever);
        assert_eq!(config.block.exit_code, 3);
        assert_eq!(config.logging.filter, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn load_with_defaults_only() {
        let config = ConfigLoader::new().load().expect("defaults should load");
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"
locale = "en"

[block]
hold = "exit"
exit_code = 42
"#,
        );

        let config = ConfigLoader::new().with_file(&path).load().expect("load");
        assert_eq!(config.locale, LocaleSetting::En);
        assert_eq!(config.block.hold, HoldPolicy::Exit);
        assert_eq!(config.block.exit_code, 42);
        assert_eq!(config.block.linger_ms, 3000);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    #[serial]
    fn environment_wins_over_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[block]\nhold = \"forever\"\nexit_code = 9\n");
        unsafe {
            env::set_var("ENVGUARD_BLOCK__HOLD", "exit");
            env::set_var("ENVGUARD_LOGGING__FILTER", "envguard=debug");
        }

        let config = ConfigLoader::new().with_file(&path).load();

        unsafe {
            env::remove_var("ENVGUARD_BLOCK__HOLD");
            env::remove_var("ENVGUARD_LOGGING__FILTER");
        }
        let config = config.expect("load");
        assert_eq!(config.block.hold, HoldPolicy::Exit);
        assert_eq!(config.block.exit_code, 9);
        assert_eq!(config.logging.filter, "envguard=debug");
    }

    #[test]
    #[serial]
    fn out_of_range_exit_code_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[block]\nexit_code = 0\n");
        let err = ConfigLoader::new()
            .with_file(&path)
            .load()
            .expect_err("exit code 0 must be rejected");
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    #[serial]
    fn unknown_hold_policy_fails_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[block]\nhold = \"sometimes\"\n");
        let err = ConfigLoader::new()
            .with_file(&path)
            .load()
            .expect_err("unknown policy must fail");
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    #[serial]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "[block\nexit_code = = 3\n");
        let err = ConfigLoader::new()
            .with_file(&path)
            .load()
            .expect_err("broken TOML must fail");
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    #[serial]
    fn default_locations_include_the_working_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_config(&dir, "locale = \"en\"\n[block]\nexit_code = 17\n");
        let previous = env::current_dir().expect("cwd");
        env::set_current_dir(dir.path()).expect("enter tempdir");

        let config = ConfigLoader::load_default();

        env::set_current_dir(previous).expect("restore cwd");
        let config = config.expect("load");
        assert_eq!(config.locale, LocaleSetting::En);
        assert_eq!(config.block.exit_code, 17);
    }

    #[test]
    fn missing_file_error() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/envguard.toml")
            .load()
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn explicit_locales_ignore_the_host() {
        assert_eq!(LocaleSetting::Ru.resolve(), Locale::Ru);
        assert_eq!(LocaleSetting::En.resolve(), Locale::En);
    }

    #[test]
    fn empty_log_filter_is_rejected() {
        let config = GuardConfig {
            logging: LoggingConfig {
                filter: "  ".to_string(),
            },
            ..GuardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
