//! Simulation rules and tuning knobs.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! config. Keys are snake_case; the camelCase spellings a web caller is likely
//! to send are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::simulator_engine::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    #[serde(alias = "pointsToWin")]
    pub points_to_win: u32,
    #[serde(alias = "winByTwo")]
    pub win_by_two: bool,
    /// Hard cap: a game ends as soon as either side reaches it.
    #[serde(alias = "maxPoints")]
    pub max_points: u32,
    /// Width of the uniform perturbation added to each point's probability.
    #[serde(alias = "randomnessFactor")]
    pub randomness_factor: f64,
    /// Bonus for a server seeded stronger than the receiver.
    #[serde(alias = "seedAdvantage")]
    pub seed_advantage: f64,
    /// Match length used by the tournament runner.
    #[serde(alias = "bestOf")]
    pub best_of: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            points_to_win: 11,
            win_by_two: true,
            max_points: 15,
            randomness_factor: 0.25,
            seed_advantage: 0.02,
            best_of: 3,
        }
    }
}

impl SimConfig {
    /// No perturbation and no seed bonus: each point is decided purely by the
    /// rating blend (still clamped).
    pub fn deterministic() -> Self {
        SimConfig {
            randomness_factor: 0.0,
            seed_advantage: 0.0,
            ..SimConfig::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.points_to_win == 0 {
            return Err(SimError::InvalidConfig("points_to_win must be at least 1".into()));
        }
        if self.win_by_two && self.max_points < self.points_to_win {
            return Err(SimError::InvalidConfig(format!(
                "max_points ({}) is below points_to_win ({})",
                self.max_points, self.points_to_win
            )));
        }
        if !(0.0..=1.0).contains(&self.randomness_factor) {
            return Err(SimError::InvalidConfig(format!(
                "randomness_factor {} outside [0, 1]",
                self.randomness_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.seed_advantage) {
            return Err(SimError::InvalidConfig(format!(
                "seed_advantage {} outside [0, 1]",
                self.seed_advantage
            )));
        }
        if self.best_of == 0 {
            return Err(SimError::InvalidBestOf { best_of: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_rules() {
        let c = SimConfig::default();
        assert_eq!(c.points_to_win, 11);
        assert!(c.win_by_two);
        assert_eq!(c.max_points, 15);
        assert!((c.randomness_factor - 0.25).abs() < 1e-12);
        assert!((c.seed_advantage - 0.02).abs() < 1e-12);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(SimConfig::from_json("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let c = SimConfig::from_json(r#"{"pointsToWin":7,"maxPoints":9,"randomnessFactor":0}"#).unwrap();
        assert_eq!(c.points_to_win, 7);
        assert_eq!(c.max_points, 9);
        assert_eq!(c.randomness_factor, 0.0);
    }

    #[test]
    fn cap_below_target_is_rejected() {
        let err = SimConfig::from_json(r#"{"points_to_win":11,"max_points":10}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn zero_target_is_rejected() {
        let c = SimConfig { points_to_win: 0, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn out_of_range_knobs_are_rejected() {
        for json in [
            r#"{"randomness_factor":-0.1}"#,
            r#"{"randomness_factor":1.5}"#,
            r#"{"seed_advantage":-0.01}"#,
            r#"{"seedAdvantage":2}"#,
        ] {
            assert!(
                matches!(SimConfig::from_json(json), Err(SimError::InvalidConfig(_))),
                "{json} should be rejected"
            );
        }
        let edges = SimConfig { randomness_factor: 1.0, seed_advantage: 0.0, ..SimConfig::default() };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn clamp_bounds_are_not_configurable() {
        // Unknown keys are ignored: the clamp cannot be widened from JSON.
        let c = SimConfig::from_json(r#"{"min_point_probability":0.0,"max_point_probability":1.0}"#).unwrap();
        assert_eq!(c, SimConfig::default());
    }

    #[test]
    fn zero_best_of_is_rejected() {
        let c = SimConfig { best_of: 0, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(SimError::InvalidBestOf { best_of: 0 })));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(SimConfig::from_json("{not json"), Err(SimError::Json(_))));
    }
}
