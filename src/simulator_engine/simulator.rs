use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::simulator_engine::{
    config::SimConfig,
    error::Result,
    game::GameEngine,
    match_play::MatchEngine,
    models::{Competitor, GameResult, GameState, MatchResult, PointLogEntry, PointResult, TournamentResult},
    point::PointEngine,
    tables::SimTables,
    tournament::{MatchEvent, TournamentRunner},
};

/// Everything needed for a one-shot tournament run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRequest {
    pub roster: Vec<Competitor>,
    /// `None` uses [`SimConfig::default`].
    #[serde(default)]
    pub config: Option<SimConfig>,
    /// `Some` reproduces the same tournament every time; `None` seeds from
    /// entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl TournamentRequest {
    /// Default config, entropy seed.
    pub fn new(roster: Vec<Competitor>) -> Self {
        TournamentRequest { roster, config: None, rng_seed: None }
    }
}

/// One-shot entry point: build a [`Simulator`] from the request and run the
/// strict (power-of-two) tournament.
pub fn run_tournament(request: TournamentRequest) -> Result<TournamentResult> {
    let mut simulator = Simulator::new(request.config.unwrap_or_default(), request.rng_seed)?;
    simulator.run_tournament(&request.roster)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Owns the rules, the flavour tables and the random source, and exposes
/// every engine entry point. Successive calls continue the same RNG stream.
pub struct Simulator {
    config: SimConfig,
    tables: SimTables,
    rng: StdRng,
}

impl Simulator {
    /// Validates `config` up front.
    pub fn new(config: SimConfig, rng_seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Ok(Simulator { config, tables: SimTables::default(), rng: make_rng(rng_seed) })
    }

    /// Replace the narrative pools and shot table.
    pub fn with_tables(mut self, tables: SimTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn simulate_point(
        &mut self, server: &Competitor, receiver: &Competitor, state: GameState,
    ) -> PointResult {
        PointEngine::new(&self.config, &self.tables).simulate_point(&mut self.rng, server, receiver, state)
    }

    pub fn simulate_game(&mut self, player1: &Competitor, player2: &Competitor) -> GameResult {
        GameEngine::new(&self.config, &self.tables).simulate_game(&mut self.rng, player1, player2)
    }

    pub fn simulate_game_with<F: FnMut(&PointLogEntry)>(
        &mut self, player1: &Competitor, player2: &Competitor, on_point: F,
    ) -> GameResult {
        GameEngine::new(&self.config, &self.tables)
            .simulate_game_with(&mut self.rng, player1, player2, on_point)
    }

    pub fn simulate_match(
        &mut self, player1: &Competitor, player2: &Competitor, best_of: u32,
    ) -> Result<MatchResult> {
        MatchEngine::new(&self.config, &self.tables)
            .simulate_match(&mut self.rng, player1, player2, best_of)
    }

    pub fn simulate_match_with<F: FnMut(u32, &GameResult)>(
        &mut self, player1: &Competitor, player2: &Competitor, best_of: u32, on_game: F,
    ) -> Result<MatchResult> {
        MatchEngine::new(&self.config, &self.tables)
            .simulate_match_with(&mut self.rng, player1, player2, best_of, on_game)
    }

    pub fn run_tournament(&mut self, roster: &[Competitor]) -> Result<TournamentResult> {
        TournamentRunner::new(&self.config, &self.tables).run(&mut self.rng, roster)
    }

    pub fn run_tournament_with<F: FnMut(&MatchEvent<'_>)>(
        &mut self, roster: &[Competitor], on_match: F,
    ) -> Result<TournamentResult> {
        TournamentRunner::new(&self.config, &self.tables).run_with(&mut self.rng, roster, on_match)
    }

    /// Bye-padded variant for rosters that are not a power of two.
    pub fn run_tournament_with_byes(&mut self, roster: &[Competitor]) -> Result<TournamentResult> {
        TournamentRunner::new(&self.config, &self.tables).run_with_byes(&mut self.rng, roster, |_| {})
    }
}
