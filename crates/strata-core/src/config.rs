use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::decode::ChannelPolicy;
use crate::platform;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Root directory the browser starts in.
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Which channel layouts the decoder accepts.
    #[serde(default)]
    pub channel_policy: ChannelPolicy,
    /// Output device name; None picks the system default.
    #[serde(default)]
    pub device: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            music_dir: default_music_dir(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            channel_policy: ChannelPolicy::default(),
            device: None,
        }
    }
}

fn default_music_dir() -> PathBuf {
    platform::default_music_dir()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.channel_policy, ChannelPolicy::StereoOnly);
        assert!(config.audio.device.is_none());
        assert!(config.browser.music_dir.is_absolute() || config.browser.music_dir == PathBuf::from("."));
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.audio.channel_policy, config.audio.channel_policy);
    }

    #[test]
    fn test_channel_policy_parses_lowercase() {
        let config: Config = toml::from_str("[audio]\nchannel_policy = \"any\"\n").unwrap();
        assert_eq!(config.audio.channel_policy, ChannelPolicy::Any);
    }
}
