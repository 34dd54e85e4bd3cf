use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Presentation tuning for drill playback, exploration and random drills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seconds spent blending from one keyframe to the next.
    pub frame_duration: f32,
    /// Upper bound on the elapsed time accepted by a single tick.
    pub max_tick_delta: f32,
    /// Display-lag blend factor while playing.
    pub drag: f32,
    /// Display-lag blend factor while scrubbing.
    pub scrub_drag: f32,
    /// Extra frames held at the end of the last step before looping.
    pub end_dwell_frames: i64,
    /// Frames held on the first keyframe after looping.
    pub restart_preroll_frames: i64,
    pub explore_drag: f32,
    /// Minimum fraction of a queued frame consumed per exploration tick.
    pub explore_min_rate: f32,
    /// The exploration consume rate grows with `depth^1.5 / explore_backlog_divisor`.
    pub explore_backlog_divisor: f32,
    pub random_path_min_frames: usize,
    /// `None` retries random walks forever.
    pub random_path_max_attempts: Option<usize>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_duration: 0.2,
            max_tick_delta: 0.25,
            drag: 0.20,
            scrub_drag: 0.12,
            end_dwell_frames: 6,
            restart_preroll_frames: 5,
            explore_drag: 0.20,
            explore_min_rate: 0.1,
            explore_backlog_divisor: 500.,
            random_path_min_frames: 32,
            random_path_max_attempts: Some(10_000),
        }
    }
}

impl PlaybackConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_ron_str(&std::fs::read_to_string(path)?)
    }

    /// Tick duration clamped to `[0, max_tick_delta]`.
    pub fn clamp_delta(&self, dt: f32) -> f32 {
        dt.clamp(0., self.max_tick_delta)
    }

    /// How much of a queued exploration frame one tick consumes with `depth` frames waiting.
    pub fn explore_rate(&self, depth: usize) -> f32 {
        ((depth as f32).powf(1.5) / self.explore_backlog_divisor).max(self.explore_min_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let text = "(frame_duration: 0.5, end_dwell_frames: 2)";
        let config = PlaybackConfig::from_ron_str(text).unwrap();
        assert_eq!(config.frame_duration, 0.5);
        assert_eq!(config.end_dwell_frames, 2);
        assert_eq!(config.restart_preroll_frames, 5);
        assert_eq!(config.random_path_max_attempts, Some(10_000));
    }

    #[test]
    fn unlimited_attempts_round_trip() {
        let text = "(random_path_max_attempts: None)";
        let config = PlaybackConfig::from_ron_str(text).unwrap();
        assert_eq!(config.random_path_max_attempts, None);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            PlaybackConfig::from_ron_str("(frame_duration: \"slow\")"),
            Err(ConfigError::RonSpannedError(_))
        ));
    }

    #[test]
    fn explore_rate_grows_with_backlog() {
        let config = PlaybackConfig::default();
        assert_eq!(config.explore_rate(0), 0.1);
        assert_eq!(config.explore_rate(1), 0.1);
        assert!((config.explore_rate(100) - 2.).abs() < 1e-4);
    }

    #[test]
    fn clamp_delta_limits_stalls() {
        let config = PlaybackConfig::default();
        assert_eq!(config.clamp_delta(3.), 0.25);
        assert_eq!(config.clamp_delta(-1.), 0.);
        assert_eq!(config.clamp_delta(0.1), 0.1);
    }
}
