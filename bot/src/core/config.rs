//! # GPA Bot Configuration
//!
//! File: bot/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, merges and validates the settings needed by `gpabot run`.
//!
//! Sources, lowest to highest precedence:
//! 1. Defaults defined in code
//! 2. A TOML file: the `--config` path if given, otherwise `.gpabot.toml` in
//!    the current directory, otherwise `<user config dir>/config.toml`
//! 3. Command-line flags and their environment variables (`TELEGRAM_TOKEN`,
//!    `PORT`)
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [telegram]
//! token = "123456:ABC-DEF"
//!
//! [liveness]
//! enabled = true
//! host = "0.0.0.0"
//! port = 8080
//! body = "Bot is alive!"
//! ```
//!
//! The bot token is required. A missing or blank token is a configuration
//! error and `gpabot run` exits before starting either task.
//!
use crate::core::error::{GpaBotError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the per-directory configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".gpabot.toml";

/// Default response body of the liveness endpoint.
pub const DEFAULT_LIVENESS_BODY: &str = "Bot is alive!";

/// Default liveness port when neither the file nor `PORT` set one.
pub const DEFAULT_LIVENESS_PORT: u16 = 8080;

/// Contents of a configuration file. Every field is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub telegram: TelegramSection,
    #[serde(default)]
    pub liveness: LivenessSection,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TelegramSection {
    pub token: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LivenessSection {
    pub enabled: Option<bool>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub body: Option<String>,
}

/// Values supplied on the command line (or through their env vars).
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<String>,
    pub token: Option<String>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub no_liveness: bool,
}

/// Effective settings for the liveness HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessConfig {
    pub enabled: bool,
    pub host: IpAddr,
    pub port: u16,
    pub body: String,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_LIVENESS_PORT,
            body: DEFAULT_LIVENESS_BODY.to_string(),
        }
    }
}

/// Bot API credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

/// Fully resolved configuration for `gpabot run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: BotToken,
    pub liveness: LivenessConfig,
}

/// Loads the configuration file (if any) and merges it with `overrides`.
pub fn load_config(overrides: &ConfigOverrides) -> Result<BotConfig> {
    let file_config = match overrides.config_path.as_deref() {
        Some(explicit) => Some(load_explicit_config(explicit)?),
        None => match load_project_config()? {
            Some(project) => Some(project),
            None => load_user_config()?,
        },
    };
    let config = resolve_config(file_config.unwrap_or_default(), overrides)
        .context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_explicit_config(raw_path: &str) -> Result<FileConfig> {
    let expanded = PathBuf::from(shellexpand::tilde(raw_path).into_owned());
    if !expanded.is_file() {
        return Err(anyhow!(GpaBotError::Config(format!(
            "Config file '{}' does not exist or is not a file.",
            expanded.display()
        ))));
    }
    info!("Loading configuration from: {}", expanded.display());
    load_config_from_path(&expanded)
}

fn load_project_config() -> Result<Option<FileConfig>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let path = current_dir.join(PROJECT_CONFIG_FILENAME);
    if path.is_file() {
        info!("Loading project configuration from: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No {} in {}", PROJECT_CONFIG_FILENAME, current_dir.display());
        Ok(None)
    }
}

fn load_user_config() -> Result<Option<FileConfig>> {
    let Some(proj_dirs) = ProjectDirs::from("dev", "gpabot", "gpabot") else {
        warn!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Merges file settings with overrides and validates the result.
pub fn resolve_config(file: FileConfig, overrides: &ConfigOverrides) -> Result<BotConfig> {
    let token = overrides
        .token
        .clone()
        .or(file.telegram.token)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            anyhow!(GpaBotError::Config(
                "No bot token configured. Set TELEGRAM_TOKEN, pass --token, or add \
                 [telegram] token to the config file."
                    .to_string()
            ))
        })?;

    let defaults = LivenessConfig::default();
    let liveness = LivenessConfig {
        enabled: !overrides.no_liveness && file.liveness.enabled.unwrap_or(defaults.enabled),
        host: overrides.host.or(file.liveness.host).unwrap_or(defaults.host),
        port: overrides.port.or(file.liveness.port).unwrap_or(defaults.port),
        body: file.liveness.body.unwrap_or(defaults.body),
    };

    if liveness.enabled && liveness.body.is_empty() {
        warn!("Liveness body is empty; monitors that check the body may flag the bot as down.");
    }

    Ok(BotConfig {
        token: BotToken(token),
        liveness,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn with_token(token: &str) -> ConfigOverrides {
        ConfigOverrides {
            token: Some(token.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_full_toml() {
        let toml_content = r#"
            [telegram]
            token = "123:abc"

            [liveness]
            enabled = false
            host = "127.0.0.1"
            port = 9000
            body = "ok"
        "#;
        let config: FileConfig = toml::from_str(toml_content).expect("Failed to parse TOML");
        assert_eq!(config.telegram.token.as_deref(), Some("123:abc"));
        assert_eq!(config.liveness.enabled, Some(false));
        assert_eq!(config.liveness.host, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(config.liveness.port, Some(9000));
        assert_eq!(config.liveness.body.as_deref(), Some("ok"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str("[liveness]\npath = \"/\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = resolve_config(FileConfig::default(), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GpaBotError>(),
            Some(GpaBotError::Config(_))
        ));
        assert!(err.to_string().contains("No bot token configured"));
    }

    #[test]
    fn test_blank_token_is_config_error() {
        assert!(resolve_config(FileConfig::default(), &with_token("   ")).is_err());
    }

    #[test]
    fn test_defaults_apply() {
        let config = resolve_config(FileConfig::default(), &with_token("t")).unwrap();
        assert_eq!(config.token.expose(), "t");
        assert_eq!(config.liveness, LivenessConfig::default());
    }

    #[test]
    fn test_overrides_beat_file() {
        let file: FileConfig = toml::from_str(
            r#"
            [telegram]
            token = "from-file"
            [liveness]
            port = 9000
            host = "127.0.0.1"
            "#,
        )
        .unwrap();
        let overrides = ConfigOverrides {
            token: Some("from-env".into()),
            port: Some(10000),
            ..Default::default()
        };
        let config = resolve_config(file, &overrides).unwrap();
        assert_eq!(config.token.expose(), "from-env");
        assert_eq!(config.liveness.port, 10000);
        assert_eq!(config.liveness.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_no_liveness_flag_disables_server() {
        let overrides = ConfigOverrides {
            no_liveness: true,
            ..with_token("t")
        };
        let config = resolve_config(FileConfig::default(), &overrides).unwrap();
        assert!(!config.liveness.enabled);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let config = resolve_config(FileConfig::default(), &with_token("secret-value")).unwrap();
        assert!(!format!("{:?}", config).contains("secret-value"));
    }

    #[test]
    fn test_load_explicit_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bot.toml");
        std::fs::write(&path, "[telegram]\ntoken = \"abc\"\n[liveness]\nport = 7070\n").unwrap();

        let overrides = ConfigOverrides {
            config_path: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let config = load_config(&overrides).unwrap();
        assert_eq!(config.token.expose(), "abc");
        assert_eq!(config.liveness.port, 7070);
    }

    #[test]
    fn test_load_explicit_config_missing_file() {
        let temp_dir = tempdir().unwrap();
        let overrides = ConfigOverrides {
            config_path: Some(temp_dir.path().join("nope.toml").to_string_lossy().into_owned()),
            ..with_token("t")
        };
        let err = load_config(&overrides).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
