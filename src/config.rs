use anyhow::{bail, Context, Result};
use digit_expansion::{MAX_BASE, MIN_BASE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest beat that still fits a MIDI tempo meta event (24-bit microseconds)
pub const MAX_BEAT_MS: u64 = 16_777;

/// Largest metrical resolution an SMF header can carry (15 bits)
pub const MAX_TICKS_PER_BEAT: u16 = 0x7FFF;

/// Playback settings, loadable from JSON
///
/// Missing fields fall back to their defaults, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Length of one melody note in milliseconds
    pub beat_ms: u64,
    pub velocity: u8,
    /// Zero-based MIDI channel
    pub channel: u8,
    /// Melody notes played over each chord
    pub melody_steps: usize,
    /// Base the number is expanded in; digit `d` becomes degree `d + 1`
    pub base: u32,
    /// Key name such as `C`, `D#` or `Bb4`
    pub key: String,
    /// Resolution of exported MIDI files
    pub ticks_per_beat: u16,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            beat_ms: 500,
            velocity: 64,
            channel: 0,
            melody_steps: 4,
            base: 7,
            key: "C".to_string(),
            ticks_per_beat: 480,
        }
    }
}

impl PerformanceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.beat_ms == 0 || self.beat_ms > MAX_BEAT_MS {
            bail!("beat_ms must be between 1 and {}, got {}", MAX_BEAT_MS, self.beat_ms);
        }
        if self.velocity > 127 {
            bail!("velocity must be at most 127, got {}", self.velocity);
        }
        if self.channel > 15 {
            bail!("channel must be between 0 and 15, got {}", self.channel);
        }
        if self.melody_steps == 0 {
            bail!("melody_steps must be at least 1");
        }
        if !(MIN_BASE..=MAX_BASE).contains(&self.base) {
            bail!("base must be between {} and {}, got {}", MIN_BASE, MAX_BASE, self.base);
        }
        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_TICKS_PER_BEAT {
            bail!(
                "ticks_per_beat must be between 1 and {}, got {}",
                MAX_TICKS_PER_BEAT,
                self.ticks_per_beat
            );
        }
        Ok(())
    }

    pub fn beat(&self) -> Duration {
        Duration::from_millis(self.beat_ms)
    }
}
