//! Situational effectiveness: a fixed weight vector per situation, applied
//! to a competitor's six stats.
//!
//! The result is a weighted average of the inputs and is not clamped.

use serde::{Deserialize, Serialize};

use crate::simulator_engine::models::{SkillStats, Stat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    Serve,
    Return,
    Rally,
    Clutch,
    PowerShot,
    FinesseShot,
}

/// One weight per stat; each situation's weights sum to 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatWeights {
    pub power: f64,
    pub finesse: f64,
    pub speed: f64,
    pub court_iq: f64,
    pub consistency: f64,
    pub mental: f64,
}

impl StatWeights {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Power       => self.power,
            Stat::Finesse     => self.finesse,
            Stat::Speed       => self.speed,
            Stat::CourtIq     => self.court_iq,
            Stat::Consistency => self.consistency,
            Stat::Mental      => self.mental,
        }
    }
}

impl Situation {
    pub const ALL: [Situation; 6] = [
        Situation::Serve,
        Situation::Return,
        Situation::Rally,
        Situation::Clutch,
        Situation::PowerShot,
        Situation::FinesseShot,
    ];

    pub fn weights(self) -> StatWeights {
        let zero = StatWeights::default();
        match self {
            Situation::Serve => StatWeights {
                power: 0.35, consistency: 0.30, mental: 0.20, court_iq: 0.15, ..zero
            },
            Situation::Return => StatWeights {
                speed: 0.30, court_iq: 0.25, consistency: 0.25, finesse: 0.20, ..zero
            },
            Situation::Rally => StatWeights {
                consistency: 0.25, speed: 0.20, court_iq: 0.20, finesse: 0.20, power: 0.15, ..zero
            },
            Situation::Clutch => StatWeights {
                mental: 0.40, consistency: 0.30, finesse: 0.20, court_iq: 0.10, ..zero
            },
            Situation::PowerShot => StatWeights {
                power: 0.60, speed: 0.15, consistency: 0.15, mental: 0.10, ..zero
            },
            Situation::FinesseShot => StatWeights {
                finesse: 0.60, court_iq: 0.20, consistency: 0.20, ..zero
            },
        }
    }
}

/// Weighted sum of `stats` under `situation`'s weight vector.
pub fn effectiveness(stats: &SkillStats, situation: Situation) -> f64 {
    let w = situation.weights();
    Stat::ALL.iter().map(|&s| w.get(s) * stats.get(s)).sum()
}
