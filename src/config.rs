use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides the config file location (used by the integration tests).
pub const CONFIG_ENV: &str = "SLACK_SHELL_CONFIG";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Used when neither `--token` nor `SLACK_TOKEN` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ApiConfig {
    fn default_base_url() -> String {
        "https://slack.com/api".into()
    }
    fn default_timeout_secs() -> u64 {
        30
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            token: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "ShellConfig::default_prompt")]
    pub prompt: String,
    /// Lines kept in the in-memory history; oldest are dropped first.
    #[serde(default = "ShellConfig::default_history_capacity")]
    pub history_capacity: usize,
}

impl ShellConfig {
    fn default_prompt() -> String {
        "slack> ".into()
    }
    fn default_history_capacity() -> usize {
        100
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: Self::default_prompt(),
            history_capacity: Self::default_history_capacity(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "bool_true")]
    pub colors: bool,
    #[serde(default = "DisplayConfig::default_indent")]
    pub indent: usize,
}

fn bool_true() -> bool {
    true
}

impl DisplayConfig {
    fn default_indent() -> usize {
        4
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            indent: Self::default_indent(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid config in {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = get_config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn create_default() -> Result<PathBuf> {
        let config = Config::default();
        config.save()?;
        get_config_path()
    }

    /// Token precedence: command line / environment first, then the file.
    pub fn resolve_token(&self, cli_token: Option<&str>) -> String {
        cli_token
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| self.api.token.clone())
            .unwrap_or_default()
    }
}

fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(config_dir.join("slack-shell").join("config.toml"))
}

pub fn show_config() -> Result<()> {
    let path = get_config_path()?;
    println!("Config: {}", path.display());
    println!();

    let mut config = if path.exists() {
        Config::load()?
    } else {
        println!("(default config, file not created)");
        println!();
        Config::default()
    };

    if config.api.token.is_some() {
        config.api.token = Some("<redacted>".into());
    }
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
