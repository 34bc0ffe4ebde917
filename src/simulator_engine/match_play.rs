//! Best-of-N matches.
//!
//! Games are fully independent: nothing carries over between them.

use rand::Rng;

use crate::simulator_engine::{
    config::SimConfig,
    error::{Result, SimError},
    game::GameEngine,
    helpers::keep_last,
    models::{Competitor, GameResult, KeyMoment, MatchResult, Side, SidePair, StatImpact},
    tables::SimTables,
};

/// Clutch points kept per match.
pub const KEY_MOMENTS_PER_MATCH: usize = 10;

/// Games needed to take a best-of-`best_of` match.
pub fn games_to_win(best_of: u32) -> u32 {
    best_of.div_ceil(2)
}

pub struct MatchEngine<'a> {
    games: GameEngine<'a>,
}

impl<'a> MatchEngine<'a> {
    pub fn new(config: &'a SimConfig, tables: &'a SimTables) -> Self {
        MatchEngine { games: GameEngine::new(config, tables) }
    }

    pub fn simulate_match<R: Rng>(
        &self, rng: &mut R, player1: &Competitor, player2: &Competitor, best_of: u32,
    ) -> Result<MatchResult> {
        self.simulate_match_with(rng, player1, player2, best_of, |_, _| {})
    }

    /// Like [`simulate_match`](Self::simulate_match), calling `on_game` with
    /// the 1-based game number and result after each game.
    pub fn simulate_match_with<R: Rng, F: FnMut(u32, &GameResult)>(
        &self, rng: &mut R, player1: &Competitor, player2: &Competitor, best_of: u32,
        mut on_game: F,
    ) -> Result<MatchResult> {
        if best_of == 0 {
            return Err(SimError::InvalidBestOf { best_of });
        }
        let target = games_to_win(best_of);

        let mut games_won = SidePair::new(0u32, 0u32);
        let mut impact = SidePair::<StatImpact>::default();
        let mut games = Vec::new();
        let mut moments = Vec::new();

        let winner = loop {
            let game = self.games.simulate_game(rng, player1, player2);
            let game_number = games.len() as u32 + 1;

            games_won[game.winner] += 1;
            impact += game.impact;
            moments.extend(
                game.key_moments
                    .iter()
                    .cloned()
                    .map(|point| KeyMoment { game_number, point }),
            );
            on_game(game_number, &game);
            games.push(game);

            if games_won.player1 >= target {
                break Side::Player1;
            }
            if games_won.player2 >= target {
                break Side::Player2;
            }
        };

        let total_points = games.iter().map(GameResult::total_points).sum();

        Ok(MatchResult {
            winner,
            loser: winner.other(),
            games_won,
            games,
            impact,
            total_points,
            key_moments: keep_last(moments, KEY_MOMENTS_PER_MATCH),
        })
    }
}
