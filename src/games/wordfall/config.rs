use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_VOCABULARY: &[&str] = &[
    "react", "javascript", "game", "coding", "developer", "keyboard", "speed", "challenge",
];

/// Tunables for a wordfall session. Every field has a default, so a config
/// file only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub vocabulary: Vec<String>,
    pub spawn_interval_ms: u64,
    pub fall_interval_ms: u64,
    /// Progress (percent fallen) past which a word is missed
    pub boundary: f64,
    pub initial_speed: f64,
    pub speed_step: f64,
    /// Speed goes up on every fall tick where score is a positive multiple of this
    pub milestone: u32,
    pub focus_delay_ms: u64,
    /// Start with sound (and the ambient track) on
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect(),
            spawn_interval_ms: 2000,
            fall_interval_ms: 100,
            boundary: 90.0,
            initial_speed: 1.0,
            speed_step: 0.5,
            milestone: 10,
            focus_delay_ms: 50,
            sound: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    EmptyVocabulary,
    BlankWord { index: usize },
    ZeroInterval { field: &'static str },
    ZeroMilestone,
    NonPositiveSpeed { value: f64 },
    NegativeSpeedStep { value: f64 },
    NonPositiveBoundary { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVocabulary => write!(f, "vocabulary must contain at least one word"),
            Self::BlankWord { index } => write!(f, "vocabulary entry {index} is blank"),
            Self::ZeroInterval { field } => write!(f, "{field} must be greater than zero"),
            Self::ZeroMilestone => write!(f, "milestone must be greater than zero"),
            Self::NonPositiveSpeed { value } => {
                write!(f, "initial_speed must be positive, got {value}")
            }
            Self::NegativeSpeedStep { value } => {
                write!(f, "speed_step must not be negative, got {value}")
            }
            Self::NonPositiveBoundary { value } => {
                write!(f, "boundary must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Defaults when `path` is None, otherwise the JSON file at `path`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            None => Self::default(),
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_json(&raw).with_context(|| format!("loading config {}", path.display()))?
            }
        };
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("parsing config json")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vocabulary.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        if let Some(index) = self.vocabulary.iter().position(|w| w.trim().is_empty()) {
            return Err(ConfigError::BlankWord { index });
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { field: "spawn_interval_ms" });
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { field: "fall_interval_ms" });
        }
        if self.milestone == 0 {
            return Err(ConfigError::ZeroMilestone);
        }
        // Written as negations so NaN is rejected too
        if !(self.initial_speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed { value: self.initial_speed });
        }
        if !(self.speed_step >= 0.0) {
            return Err(ConfigError::NegativeSpeedStep { value: self.speed_step });
        }
        if !(self.boundary > 0.0) {
            return Err(ConfigError::NonPositiveBoundary { value: self.boundary });
        }
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(self.fall_interval_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.vocabulary.len(), 8);
        assert_eq!(config.spawn_interval(), Duration::from_millis(2000));
        assert_eq!(config.fall_interval(), Duration::from_millis(100));
        assert_eq!(config.boundary, 90.0);
        assert_eq!(config.initial_speed, 1.0);
        assert_eq!(config.speed_step, 0.5);
        assert_eq!(config.milestone, 10);
        assert!(!config.sound);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json(r#"{ "vocabulary": ["rust", "tokio"], "sound": true }"#)
            .expect("valid config");
        assert_eq!(config.vocabulary, vec!["rust".to_string(), "tokio".to_string()]);
        assert!(config.sound);
        assert_eq!(config.fall_interval_ms, 100);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GameConfig::from_json(r#"{ "vocab": ["rust"] }"#).is_err());
    }

    #[test]
    fn validation_catches_bad_values() {
        let cases: Vec<(GameConfig, ConfigError)> = vec![
            (
                GameConfig { vocabulary: vec![], ..GameConfig::default() },
                ConfigError::EmptyVocabulary,
            ),
            (
                GameConfig { vocabulary: vec!["ok".into(), "  ".into()], ..GameConfig::default() },
                ConfigError::BlankWord { index: 1 },
            ),
            (
                GameConfig { fall_interval_ms: 0, ..GameConfig::default() },
                ConfigError::ZeroInterval { field: "fall_interval_ms" },
            ),
            (
                GameConfig { milestone: 0, ..GameConfig::default() },
                ConfigError::ZeroMilestone,
            ),
            (
                GameConfig { initial_speed: 0.0, ..GameConfig::default() },
                ConfigError::NonPositiveSpeed { value: 0.0 },
            ),
            (
                GameConfig { speed_step: -0.5, ..GameConfig::default() },
                ConfigError::NegativeSpeedStep { value: -0.5 },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn load_reads_file_and_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "milestone": 5 }}"#).expect("write config");
        let config = GameConfig::load(Some(file.path())).expect("load config");
        assert_eq!(config.milestone, 5);

        let missing = file.path().with_extension("missing");
        let err = GameConfig::load(Some(&missing)).expect_err("missing file");
        assert!(format!("{err:#}").contains("reading config"));
    }
}
