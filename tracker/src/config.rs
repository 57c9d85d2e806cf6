use serde::{Deserialize, Deserializer};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::ground_track::{DEFAULT_WINDOW_MINUTES, MAX_WINDOW_MINUTES};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration, {0}")]
    Invalid(String),
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub store: StoreConfig,
    pub feed: FeedConfig,
    pub schedule: ScheduleConfig,
    pub ground_track: GroundTrackConfig,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StoreConfig {
    /// JSON file holding the tracked catalog
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("satellites.json"),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FeedConfig {
    /// GP query endpoint, Celestrak's when not set
    pub url: Option<Url>,
    /// Satellite group to track
    pub group: String,
    #[serde(deserialize_with = "human_duration")]
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            group: "stations".to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScheduleConfig {
    #[serde(deserialize_with = "human_duration")]
    pub positions: Duration,
    #[serde(deserialize_with = "human_duration")]
    pub ground_tracks: Duration,
    /// How often the catalog cycle wakes up to check the cool-down
    #[serde(deserialize_with = "human_duration")]
    pub catalog: Duration,
    /// Minimum time between two element set fetches
    #[serde(deserialize_with = "human_duration")]
    pub catalog_cooldown: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            positions: Duration::from_secs(5),
            ground_tracks: Duration::from_secs(2 * 60 * 60),
            catalog: Duration::from_secs(60 * 60),
            catalog_cooldown: Duration::from_secs(3 * 60 * 60),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GroundTrackConfig {
    pub window_minutes: u32,
}

impl Default for GroundTrackConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        let intervals = [
            ("feed.timeout", cfg.feed.timeout),
            ("schedule.positions", cfg.schedule.positions),
            ("schedule.ground-tracks", cfg.schedule.ground_tracks),
            ("schedule.catalog", cfg.schedule.catalog),
        ];
        for (name, d) in intervals {
            if d.is_zero() {
                return Err(ConfigError::Invalid(format!("{name} must be non-zero")));
            }
        }
        if chrono::Duration::from_std(cfg.schedule.catalog_cooldown).is_err() {
            return Err(ConfigError::Invalid(
                "schedule.catalog-cooldown is out of range".to_owned(),
            ));
        }
        if cfg.feed.group.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.group must not be empty".to_owned()));
        }
        if !(1..=MAX_WINDOW_MINUTES).contains(&cfg.ground_track.window_minutes) {
            return Err(ConfigError::Invalid(format!(
                "ground-track.window-minutes must be between 1 and {MAX_WINDOW_MINUTES}"
            )));
        }

        Ok(cfg)
    }
}

fn human_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}
