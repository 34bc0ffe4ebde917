//! Single-rally simulation.
//!
//! ## Win probability
//!
//! Each side's strength for the rally is a blend of its role score
//! (serve for the server, return for the receiver) and its situation score
//! (rally, or clutch under pressure):
//!
//! ```text
//! total = 0.3 × role + 0.7 × situation
//! p     = server_total / (server_total + receiver_total)
//! ```
//!
//! A uniform perturbation in `[-randomness/2, +randomness/2]` and an optional
//! seed bonus are added, then `p` is clamped to
//! `[MIN_POINT_PROBABILITY, MAX_POINT_PROBABILITY]`. No point is ever a
//! certainty, whatever the config.
//!
//! ## RNG ordering
//!
//! Draws happen in a fixed order: perturbation, outcome, narrative, shot
//! type, then one draw per stat for impact attribution. Reordering them
//! changes every seeded result.

use rand::Rng;

use crate::simulator_engine::{
    config::SimConfig,
    models::{Competitor, GameState, PointResult, Role, StatImpact, Stat},
    rating::{effectiveness, Situation},
    tables::{NarrativeKind, SimTables},
};

/// Floor and ceiling of a server's point-win probability.
pub const MIN_POINT_PROBABILITY: f64 = 0.15;
pub const MAX_POINT_PROBABILITY: f64 = 0.85;

const ROLE_BLEND: f64 = 0.3;
const SITUATION_BLEND: f64 = 0.7;

/// Both sides at or above this score and within two is "close and late".
const CLUTCH_FLOOR: u32 = 8;
const CLUTCH_MARGIN: u32 = 2;

/// A winner's power or finesse above this picks the showcase narrative.
const SHOWCASE_THRESHOLD: f64 = 75.0;

/// Game point for either side, or close and late.
pub fn is_clutch(score1: u32, score2: u32, points_to_win: u32) -> bool {
    let game_point = points_to_win.saturating_sub(1);
    if score1 >= game_point || score2 >= game_point {
        return true;
    }
    score1 >= CLUTCH_FLOOR && score2 >= CLUTCH_FLOOR && score1.abs_diff(score2) <= CLUTCH_MARGIN
}

fn narrative_kind(clutch: bool, winner: &Competitor) -> NarrativeKind {
    if clutch {
        NarrativeKind::Clutch
    } else if winner.stats.power > SHOWCASE_THRESHOLD {
        NarrativeKind::Power
    } else if winner.stats.finesse > SHOWCASE_THRESHOLD {
        NarrativeKind::Finesse
    } else {
        NarrativeKind::Normal
    }
}

pub struct PointEngine<'a> {
    config: &'a SimConfig,
    tables: &'a SimTables,
}

impl<'a> PointEngine<'a> {
    pub fn new(config: &'a SimConfig, tables: &'a SimTables) -> Self {
        PointEngine { config, tables }
    }

    /// Server-win probability for a given perturbation, after the seed bonus
    /// and clamping. Pure: the random draw is supplied by the caller.
    pub fn win_probability(
        &self, server: &Competitor, receiver: &Competitor, state: GameState, perturbation: f64,
    ) -> f64 {
        let clutch = is_clutch(state.server_score, state.receiver_score, state.points_to_win);
        let situation = if clutch { Situation::Clutch } else { Situation::Rally };

        let server_total = ROLE_BLEND * effectiveness(&server.stats, Situation::Serve)
            + SITUATION_BLEND * effectiveness(&server.stats, situation);
        let receiver_total = ROLE_BLEND * effectiveness(&receiver.stats, Situation::Return)
            + SITUATION_BLEND * effectiveness(&receiver.stats, situation);

        let combined = server_total + receiver_total;
        let base = if combined > 0.0 { server_total / combined } else { 0.5 };

        let mut p = base + perturbation;
        if let (Some(s), Some(r)) = (server.seed, receiver.seed) {
            if s < r {
                p += self.config.seed_advantage;
            }
        }
        p.clamp(MIN_POINT_PROBABILITY, MAX_POINT_PROBABILITY)
    }

    pub fn simulate_point<R: Rng>(
        &self, rng: &mut R, server: &Competitor, receiver: &Competitor, state: GameState,
    ) -> PointResult {
        let is_clutch = is_clutch(state.server_score, state.receiver_score, state.points_to_win);

        let perturbation = (rng.gen::<f64>() - 0.5) * self.config.randomness_factor;
        let win_probability = self.win_probability(server, receiver, state, perturbation);

        let draw = rng.gen::<f64>();
        let server_won = draw < win_probability;
        let (winner_role, loser_role) = if server_won {
            (Role::Server, Role::Receiver)
        } else {
            (Role::Receiver, Role::Server)
        };
        let (winner, loser) = if server_won { (server, receiver) } else { (receiver, server) };

        let narrative = self.tables.narratives.render(
            rng,
            narrative_kind(is_clutch, winner),
            winner.label(),
            loser.label(),
        );
        let shot_type = self.tables.shots.pick(rng, &winner.stats);

        // Each stat is credited independently, so a uniformly strong winner
        // is usually credited on all six.
        let mut impact = StatImpact::default();
        for stat in Stat::ALL {
            if rng.gen::<f64>() < winner.stats.get(stat) / 100.0 {
                impact.credit(stat);
            }
        }

        PointResult {
            winner: winner_role,
            loser: loser_role,
            is_clutch,
            win_probability,
            draw,
            narrative,
            shot_type,
            impact,
        }
    }
}
