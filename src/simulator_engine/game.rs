//! One game, point by point.
//!
//! Player 1 serves first. After every point the serve passes to the side
//! that did not win it. This is a deliberate simplification and does not
//! follow real doubles rotation.
//!
//! A game always ends: under win-by-two rules the `max_points` cap is an
//! unconditional exit.

use rand::Rng;
use tracing::trace;

use crate::simulator_engine::{
    config::SimConfig,
    helpers::keep_last,
    models::{Competitor, GameResult, GameState, PointLogEntry, Side, SidePair, StatImpact},
    point::PointEngine,
    tables::SimTables,
};

/// Clutch points kept per game.
pub const KEY_MOMENTS_PER_GAME: usize = 5;

/// The game's winner for a score, or `None` while it continues.
pub fn game_winner(config: &SimConfig, score1: u32, score2: u32) -> Option<Side> {
    let leader = if score1 > score2 {
        Side::Player1
    } else if score2 > score1 {
        Side::Player2
    } else {
        return None;
    };
    let top = score1.max(score2);

    if config.win_by_two {
        if top >= config.max_points {
            return Some(leader);
        }
        (top >= config.points_to_win && score1.abs_diff(score2) >= 2).then_some(leader)
    } else {
        (top >= config.points_to_win).then_some(leader)
    }
}

pub struct GameEngine<'a> {
    config: &'a SimConfig,
    points: PointEngine<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(config: &'a SimConfig, tables: &'a SimTables) -> Self {
        GameEngine { config, points: PointEngine::new(config, tables) }
    }

    pub fn simulate_game<R: Rng>(
        &self, rng: &mut R, player1: &Competitor, player2: &Competitor,
    ) -> GameResult {
        self.simulate_game_with(rng, player1, player2, |_| {})
    }

    /// Like [`simulate_game`](Self::simulate_game), calling `on_point` with
    /// each log entry as soon as the point is scored.
    pub fn simulate_game_with<R: Rng, F: FnMut(&PointLogEntry)>(
        &self, rng: &mut R, player1: &Competitor, player2: &Competitor, mut on_point: F,
    ) -> GameResult {
        let players = SidePair::new(player1, player2);
        let mut score = SidePair::new(0u32, 0u32);
        let mut impact = SidePair::<StatImpact>::default();
        let mut points = Vec::new();
        let mut server = Side::Player1;

        let winner = loop {
            let receiver = server.other();
            let state = GameState {
                server_score: score[server],
                receiver_score: score[receiver],
                points_to_win: self.config.points_to_win,
            };
            let point = self.points.simulate_point(rng, players[server], players[receiver], state);
            let point_winner = if point.server_won() { server } else { receiver };

            score[point_winner] += 1;
            impact[point_winner] += point.impact;

            let entry = PointLogEntry {
                score: (score.player1, score.player2),
                server,
                winner: point_winner,
                narrative: point.narrative,
                shot_type: point.shot_type,
                clutch: point.is_clutch,
            };
            on_point(&entry);
            points.push(entry);

            server = point_winner.other();

            if let Some(side) = game_winner(self.config, score.player1, score.player2) {
                break side;
            }
        };

        let clutch: Vec<PointLogEntry> = points.iter().filter(|p| p.clutch).cloned().collect();
        let key_moments = keep_last(clutch, KEY_MOMENTS_PER_GAME);

        trace!(
            winner = %players[winner].label(),
            score = %format!("{}-{}", score.player1, score.player2),
            points = points.len(),
            "game complete"
        );

        GameResult {
            winner,
            loser: winner.other(),
            score: (score.player1, score.player2),
            points,
            impact,
            key_moments,
        }
    }
}
