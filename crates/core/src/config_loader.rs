use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, TOML, JSON, and `SENTIMENT_` environment variables.
    ///
    /// Missing files are skipped, so an empty environment yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load() -> Result<AppConfig> {
        Self::extract(Self::base().merge(Self::env()))
    }

    /// Loads configuration with an explicit file layered over `config/Config.toml`.
    ///
    /// The file format is chosen from the extension (`.json` or TOML otherwise).
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or the
    /// merged configuration fails validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }

        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::base().merge(Json::file(path)),
            _ => Self::base().merge(Toml::file(path)),
        };

        // Environment overrides always win over files.
        Self::extract(figment.merge(Self::env()))
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Config.toml"))
            .join(Json::file("config/Config.json"))
    }

    fn env() -> Env {
        Env::prefixed("SENTIMENT_").split("__")
    }

    fn extract(figment: Figment) -> Result<AppConfig> {
        let config: AppConfig = figment.extract()?;
        config.signal.validate()?;
        tracing::debug!(signal = ?config.signal, "configuration loaded");
        Ok(config)
    }
}
