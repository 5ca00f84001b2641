//! Renderer configuration, loaded from `render_config.json` and validated
//! before use.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::path::{MAX_RESOLUTION, MIN_RESOLUTION, PAD_COUNT};
use crate::crew::CrewOptions;
use crate::data::DataPaths;
use crate::error::PathError;
use crate::player::Player;
use crate::renderer::MissionPathRenderer;
use crate::resolution::PathResolution;

/// Largest star count accepted for the backdrop.
pub const MAX_STARS: u32 = 10_000;

/// Settings shared by the harness and the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spline segments per control-point window.
    pub resolution: u16,
    /// Directory holding `gamedata/`, `audio/` and `images/`.
    pub data_root: PathBuf,
    pub starfield_seed: u64,
    pub star_count: u32,
    /// Mission shown first by the viewer.
    pub default_mission: u8,
    pub player: Player,
    pub pad: u8,
    pub no_crew_training: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: PathResolution::default().get(),
            data_root: PathBuf::from("data"),
            starfield_seed: 1957,
            star_count: 400,
            default_mission: 1,
            player: Player::Usa,
            pad: 0,
            no_crew_training: false,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Resolution outside 1..=500.
    ResolutionOutOfRange(u16),
    /// Launch pad outside 0..=2.
    InvalidPad(u8),
    /// More stars than the screen sensibly holds.
    TooManyStars(u32),
    /// Mission codes are two decimal digits.
    InvalidMission(u8),
    EmptyDataRoot,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ResolutionOutOfRange(r) => write!(
                f,
                "Resolution {} outside {}..={}",
                r, MIN_RESOLUTION, MAX_RESOLUTION
            ),
            ConfigError::InvalidPad(p) => write!(f, "Invalid launch pad {}", p),
            ConfigError::TooManyStars(n) => write!(f, "Star count {} exceeds {}", n, MAX_STARS),
            ConfigError::InvalidMission(c) => write!(f, "Invalid mission code {}", c),
            ConfigError::EmptyDataRoot => write!(f, "Data root is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, PathError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Check every field; returns all problems found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            errors.push(ConfigError::ResolutionOutOfRange(self.resolution));
        }
        if self.pad >= PAD_COUNT {
            errors.push(ConfigError::InvalidPad(self.pad));
        }
        if self.star_count > MAX_STARS {
            errors.push(ConfigError::TooManyStars(self.star_count));
        }
        if self.default_mission > 99 {
            errors.push(ConfigError::InvalidMission(self.default_mission));
        }
        if self.data_root.as_os_str().is_empty() {
            errors.push(ConfigError::EmptyDataRoot);
        }

        errors
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::new(self.data_root.clone())
    }

    pub fn crew_options(&self) -> CrewOptions {
        CrewOptions {
            no_crew_training: self.no_crew_training,
        }
    }

    /// A renderer starting at the configured resolution (clamped).
    pub fn to_renderer(&self) -> MissionPathRenderer {
        MissionPathRenderer::with_resolution(PathResolution::new(self.resolution))
    }
}
