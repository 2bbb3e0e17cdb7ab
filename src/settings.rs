//! Engine settings
//!
//! Every timing and sizing constant the engine uses is tunable here. Defaults
//! come from [`crate::consts`]. Hosts may supply overrides as JSON; nothing is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SettingsError};

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Traversal ===
    /// Duration a whole pattern would take if curve speed were uniform (ms)
    pub target_duration_ms: f64,
    /// Ball speed cap (px/s)
    pub max_speed_px_per_sec: f64,
    /// Sub-samples per frame interval
    pub sub_steps: u32,
    /// Squared pixel distance below which a point is not redrawn
    pub min_draw_dist_sq: f64,
    /// Progress offset used to probe local curve speed
    pub probe_offset: f64,

    // === Lifecycle ===
    /// Erase phase length (ms)
    pub erase_duration_ms: f64,

    // === Table ===
    pub ball_radius: f64,
    pub min_table_size: f64,
    pub max_table_size: f64,
    /// Space left around the table inside the viewport
    pub viewport_margin: f64,
    /// Drawing radius as a fraction of the table diameter
    pub draw_scale_ratio: f64,
    /// Size changes at or below this are ignored
    pub resize_threshold: f64,

    /// Fixed RNG seed (None = seeded from the clock by the host)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_duration_ms: TARGET_DURATION_MS,
            max_speed_px_per_sec: MAX_SPEED_PX_PER_SEC,
            sub_steps: SUB_STEPS,
            min_draw_dist_sq: MIN_DRAW_DIST_SQ,
            probe_offset: PROBE_OFFSET,

            erase_duration_ms: ERASE_DURATION_MS,

            ball_radius: BALL_RADIUS,
            min_table_size: MIN_TABLE_SIZE,
            max_table_size: MAX_TABLE_SIZE,
            viewport_margin: VIEWPORT_MARGIN,
            draw_scale_ratio: DRAW_SCALE_RATIO,
            resize_threshold: RESIZE_THRESHOLD,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings a host was handed as JSON, or defaults if none were supplied
    /// or they were rejected
    pub fn from_supplied(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Using supplied settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring supplied settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("target_duration_ms", self.target_duration_ms),
            ("max_speed_px_per_sec", self.max_speed_px_per_sec),
            ("erase_duration_ms", self.erase_duration_ms),
            ("probe_offset", self.probe_offset),
            ("ball_radius", self.ball_radius),
            ("min_table_size", self.min_table_size),
            ("max_table_size", self.max_table_size),
            ("draw_scale_ratio", self.draw_scale_ratio),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(SettingsError::invalid(field, "must be finite"));
            }
            if value <= 0.0 {
                return Err(SettingsError::invalid(field, "must be positive"));
            }
        }

        let non_negative = [
            ("min_draw_dist_sq", self.min_draw_dist_sq),
            ("viewport_margin", self.viewport_margin),
            ("resize_threshold", self.resize_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::invalid(field, "must be finite and non-negative"));
            }
        }

        if self.sub_steps == 0 {
            return Err(SettingsError::invalid("sub_steps", "must be at least 1"));
        }
        if self.min_table_size > self.max_table_size {
            return Err(SettingsError::invalid(
                "min_table_size",
                "must not exceed max_table_size",
            ));
        }
        if self.draw_scale_ratio > 0.5 {
            return Err(SettingsError::invalid(
                "draw_scale_ratio",
                "drawing radius must fit inside the table",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "erase_duration_ms": 4000.0 }"#).unwrap();
        assert_eq!(settings.erase_duration_ms, 4000.0);
        assert_eq!(settings.target_duration_ms, TARGET_DURATION_MS);
        assert_eq!(settings.sub_steps, SUB_STEPS);
    }

    #[test]
    fn test_json_roundtrip_preserves_seed() {
        let settings = Settings {
            seed: Some(42),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_zero_speed_cap() {
        let err = Settings::from_json(r#"{ "max_speed_px_per_sec": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "max_speed_px_per_sec",
                ..
            }
        ));
    }

    #[test]
    fn test_supplied_settings_fall_back_to_defaults() {
        assert_eq!(Settings::from_supplied(None), Settings::default());
        assert_eq!(Settings::from_supplied(Some("{ nope")), Settings::default());
        assert_eq!(
            Settings::from_supplied(Some(r#"{ "sub_steps": 0 }"#)),
            Settings::default()
        );
        let supplied = Settings::from_supplied(Some(r#"{ "seed": 7, "ball_radius": 6.0 }"#));
        assert_eq!(supplied.seed, Some(7));
        assert_eq!(supplied.ball_radius, 6.0);
    }

    #[test]
    fn test_rejects_zero_sub_steps() {
        let settings = Settings {
            sub_steps: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_size_bounds() {
        let settings = Settings {
            min_table_size: 900.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
