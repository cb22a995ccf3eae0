//! Match settings
//!
//! Timing and input tuning, loaded from a JSON file. Missing fields take
//! their defaults so old files keep working.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_RATE, POWER_MULTIPLIER};
use crate::error::Result;
use crate::sim::Shooter;

/// Tunable match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for AI think-time jitter
    pub seed: u64,
    /// Frames per second the controller is driven at
    pub frame_rate: u32,

    // === AI timing ===
    /// Shortest AI think delay before a shot (ms)
    pub ai_think_min_ms: u32,
    /// Longest AI think delay before a shot (ms)
    pub ai_think_max_ms: u32,
    /// Delay before the AI places the cue ball (ms)
    pub ai_place_ms: u32,

    // === Input ===
    /// Drag length to cue-ball velocity
    pub power_multiplier: f32,

    // === Seats ===
    pub player_is_ai: bool,
    pub opponent_is_ai: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            frame_rate: FRAME_RATE,

            ai_think_min_ms: 1000,
            ai_think_max_ms: 2000,
            ai_place_ms: 1000,

            power_multiplier: POWER_MULTIPLIER,

            player_is_ai: false,
            opponent_is_ai: true,
        }
    }
}

impl Settings {
    /// Both seats computer-controlled
    pub fn ai_vs_ai(seed: u64) -> Self {
        Self {
            seed,
            player_is_ai: true,
            opponent_is_ai: true,
            ..Self::default()
        }
    }

    pub fn is_ai(&self, shooter: Shooter) -> bool {
        match shooter {
            Shooter::Player => self.player_is_ai,
            Shooter::Opponent => self.opponent_is_ai,
        }
    }

    /// Milliseconds to frames at the configured rate, rounded up
    pub fn ms_to_frames(&self, ms: u32) -> u64 {
        let rate = u64::from(self.frame_rate.max(1));
        (u64::from(ms) * rate).div_ceil(1000)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on a missing or bad file
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Keep the think range ordered and the frame rate non-zero
    fn sanitized(mut self) -> Self {
        if self.ai_think_max_ms < self.ai_think_min_ms {
            std::mem::swap(&mut self.ai_think_min_ms, &mut self.ai_think_max_ms);
        }
        if self.frame_rate == 0 {
            self.frame_rate = FRAME_RATE;
        }
        self
    }
}
