use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// weather_api_key = "..."
    /// news_api_key = "..."
    pub weather_api_key: Option<String>,
    pub news_api_key: Option<String>,
}

/// Non-empty API keys extracted from a [`Config`].
///
/// Constructing this is the startup gate: a missing or blank key is a fatal
/// configuration problem, never a pipeline error.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub weather_api_key: String,
    pub news_api_key: String,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "zipcast", "zipcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Extract validated credentials, failing when either key is missing or
    /// blank after trimming.
    pub fn credentials(&self) -> Result<Credentials> {
        let weather_api_key = non_empty(self.weather_api_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "No OpenWeatherMap API key configured.\n\
                 Hint: run `zipcast configure` and enter your API keys."
            )
        })?;

        let news_api_key = non_empty(self.news_api_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "No NewsAPI key configured.\n\
                 Hint: run `zipcast configure` and enter your API keys."
            )
        })?;

        Ok(Credentials {
            weather_api_key,
            news_api_key,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_error_when_nothing_is_configured() {
        let cfg = Config::default();
        let err = cfg.credentials().unwrap_err();
        assert!(err.to_string().contains("No OpenWeatherMap API key"));
    }

    #[test]
    fn credentials_error_when_news_key_is_blank() {
        let cfg = Config {
            weather_api_key: Some("WEATHER_KEY".to_string()),
            news_api_key: Some("   ".to_string()),
        };
        let err = cfg.credentials().unwrap_err();
        assert!(err.to_string().contains("No NewsAPI key"));
    }

    #[test]
    fn credentials_trim_configured_keys() {
        let cfg = Config {
            weather_api_key: Some("  WEATHER_KEY  ".to_string()),
            news_api_key: Some("NEWS_KEY".to_string()),
        };

        let creds = cfg.credentials().expect("both keys are configured");
        assert_eq!(creds.weather_api_key, "WEATHER_KEY");
        assert_eq!(creds.news_api_key, "NEWS_KEY");
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            weather_api_key: Some("WEATHER_KEY".to_string()),
            news_api_key: Some("NEWS_KEY".to_string()),
        };

        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.weather_api_key.as_deref(), Some("WEATHER_KEY"));
        assert_eq!(parsed.news_api_key.as_deref(), Some("NEWS_KEY"));
    }
}
