//! Static flavour data consumed by the point engine.
//!
//! Narrative pools and the shot-type table are plain values handed to the
//! engine at construction. `SimTables::default()` carries the stock tables;
//! callers may replace any pool or the whole shot table.
//!
//! Narrative templates use `{winner}` and `{loser}` placeholders, filled with
//! the competitors' display names.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulator_engine::{
    helpers::{pick, weighted_pick},
    models::{ShotType, SkillStats},
};

const NORMAL: &[&str] = &[
    "{winner} wins a patient exchange at the kitchen line.",
    "{winner} keeps the ball deep until {loser} misses long.",
    "{loser} pops one up and {winner} puts it away.",
    "{winner} resets cleanly and outlasts {loser}.",
    "{loser} dumps a third-shot drop into the net.",
    "{winner} takes the point with steady placement.",
];

const CLUTCH: &[&str] = &[
    "Under pressure, {winner} holds nerve and takes the big point!",
    "{winner} comes up huge when it matters most!",
    "Ice in the veins: {winner} converts with everything on the line.",
    "{loser} blinks first in a tense rally; {winner} capitalises.",
    "{winner} refuses to miss and steals the pressure point.",
];

const POWER: &[&str] = &[
    "{winner} rips a drive past {loser}!",
    "{winner} overpowers {loser} with a blistering put-away.",
    "Too much pace. {loser} can't handle {winner}'s drive.",
    "{winner} smashes the short ball home.",
];

const FINESSE: &[&str] = &[
    "{winner} feathers a drop that dies in the kitchen.",
    "A delicate angle from {winner} leaves {loser} stranded.",
    "{winner} wins the dink battle with perfect touch.",
    "{winner} lifts a lob just over {loser}'s reach.",
];

/// Fallback when every pool a point could draw from is empty.
const FALLBACK_NARRATIVE: &str = "{winner} wins the point.";

/// Which narrative pool a point draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeKind {
    Normal,
    Clutch,
    Power,
    Finesse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativePools {
    pub normal: Vec<String>,
    pub clutch: Vec<String>,
    pub power: Vec<String>,
    pub finesse: Vec<String>,
}

impl Default for NarrativePools {
    fn default() -> Self {
        let owned = |pool: &[&str]| -> Vec<String> { pool.iter().map(|s| s.to_string()).collect() };
        NarrativePools {
            normal: owned(NORMAL),
            clutch: owned(CLUTCH),
            power: owned(POWER),
            finesse: owned(FINESSE),
        }
    }
}

impl NarrativePools {
    pub fn pool(&self, kind: NarrativeKind) -> &[String] {
        match kind {
            NarrativeKind::Normal  => &self.normal,
            NarrativeKind::Clutch  => &self.clutch,
            NarrativeKind::Power   => &self.power,
            NarrativeKind::Finesse => &self.finesse,
        }
    }

    /// Pick a template from `kind`'s pool (falling back to the normal pool if
    /// it is empty) and fill in the names.
    pub fn render<R: Rng>(
        &self, rng: &mut R, kind: NarrativeKind, winner: &str, loser: &str,
    ) -> String {
        let template = pick(rng, self.pool(kind))
            .or_else(|| pick(rng, &self.normal))
            .map(String::as_str)
            .unwrap_or(FALLBACK_NARRATIVE);
        template.replace("{winner}", winner).replace("{loser}", loser)
    }
}

/// How a shot's weight is derived from the hitter's stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotWeight {
    /// `factor × finesse`
    Finesse(f64),
    /// `factor × power`
    Power(f64),
    Fixed(f64),
}

impl ShotWeight {
    pub fn resolve(self, stats: &SkillStats) -> f64 {
        match self {
            ShotWeight::Finesse(k) => k * stats.finesse,
            ShotWeight::Power(k)   => k * stats.power,
            ShotWeight::Fixed(w)   => w,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTable {
    pub entries: Vec<(ShotType, ShotWeight)>,
}

impl Default for ShotTable {
    fn default() -> Self {
        ShotTable {
            entries: vec![
                (ShotType::Dink,     ShotWeight::Finesse(1.5)),
                (ShotType::Drive,    ShotWeight::Power(1.2)),
                (ShotType::Drop,     ShotWeight::Finesse(1.0)),
                (ShotType::Lob,      ShotWeight::Fixed(20.0)),
                (ShotType::Volley,   ShotWeight::Fixed(40.0)),
                (ShotType::Overhead, ShotWeight::Power(0.8)),
            ],
        }
    }
}

impl ShotTable {
    /// Resolved `(shot, weight)` pairs for a hitter.
    pub fn weights(&self, stats: &SkillStats) -> Vec<(ShotType, f64)> {
        self.entries.iter().map(|&(shot, w)| (shot, w.resolve(stats))).collect()
    }

    /// Weighted draw over the table. A table with no positive weight yields a
    /// volley.
    pub fn pick<R: Rng>(&self, rng: &mut R, stats: &SkillStats) -> ShotType {
        weighted_pick(rng, &self.weights(stats)).unwrap_or(ShotType::Volley)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTables {
    pub narratives: NarrativePools,
    pub shots: ShotTable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn render_fills_placeholders() {
        let mut rng = StdRng::seed_from_u64(3);
        let pools = NarrativePools::default();
        for kind in [NarrativeKind::Normal, NarrativeKind::Clutch, NarrativeKind::Power, NarrativeKind::Finesse] {
            let text = pools.render(&mut rng, kind, "Ana", "Ben");
            assert!(!text.contains('{'), "unfilled placeholder in {text:?}");
            assert!(text.contains("Ana") || text.contains("Ben"), "{text:?}");
        }
    }

    #[test]
    fn empty_pool_falls_back_to_normal() {
        let pools = NarrativePools {
            normal: vec!["{winner} only".into()],
            clutch: vec![],
            power: vec![],
            finesse: vec![],
        };
        let text = pools.render(&mut StepRng::new(0, 0), NarrativeKind::Clutch, "Ana", "Ben");
        assert_eq!(text, "Ana only");
    }

    #[test]
    fn all_pools_empty_uses_fallback() {
        let pools = NarrativePools { normal: vec![], clutch: vec![], power: vec![], finesse: vec![] };
        let text = pools.render(&mut StepRng::new(0, 0), NarrativeKind::Normal, "Ana", "Ben");
        assert_eq!(text, "Ana wins the point.");
    }

    #[test]
    fn shot_weights_scale_with_stats() {
        let table = ShotTable::default();
        let stats = SkillStats { power: 80.0, finesse: 40.0, ..SkillStats::default() };
        let w = table.weights(&stats);
        let expected = [
            (ShotType::Dink, 60.0),
            (ShotType::Drive, 96.0),
            (ShotType::Drop, 40.0),
            (ShotType::Lob, 20.0),
            (ShotType::Volley, 40.0),
            (ShotType::Overhead, 64.0),
        ];
        for ((shot, weight), (want_shot, want_weight)) in w.iter().zip(expected) {
            assert_eq!(*shot, want_shot);
            assert!((weight - want_weight).abs() < 1e-9, "{shot:?}: {weight}");
        }
    }

    #[test]
    fn zero_skill_hitter_only_plays_fixed_shots() {
        let table = ShotTable::default();
        let stats = SkillStats::uniform(0.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let shot = table.pick(&mut rng, &stats);
            assert!(matches!(shot, ShotType::Lob | ShotType::Volley), "{shot:?}");
        }
    }
}
