//! # rally_sim
//!
//! A fully in-memory, seedable racquet-sport tournament simulator.
//!
//! The engine takes a roster of rated competitors, seeds them into a standard
//! single-elimination bracket and plays every match point by point. Each point
//! is decided by blending six skill ratings into situational effectiveness
//! scores; games, matches and rounds are built on top of that.
//!
//! ## How it works
//!
//! 1. Build a [`TournamentRequest`] with a roster, an optional [`SimConfig`]
//!    and an optional RNG seed.
//! 2. Call [`run_tournament`] — the roster is seeded by strength, placed so that
//!    seed 1 meets seed N in round one, and every round is simulated until a
//!    champion remains.
//! 3. The returned [`TournamentResult`] holds the champion, runner-up, third
//!    place, every round with full match/game/point detail, and a flattened
//!    [`BracketView`] ready for display.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` to reproduce the exact same
//!   tournament every time.
//! - **Never certain**: every point's server-win probability is clamped to
//!   `[0.15, 0.85]`, whatever the rating gap.
//! - **Always finishes**: games stop at the `max_points` cap even under
//!   win-by-two rules.
//! - **Plain data out**: every result type is `Serialize`, so it can go straight
//!   to `serde_json`, a database writer or a template.
//!
//! ## Quick start
//!
//! ```rust
//! use rally_sim::{run_tournament, Competitor, SkillStats, TournamentRequest};
//!
//! let roster: Vec<Competitor> = (0..8)
//!     .map(|i| Competitor::new(format!("Player {i}"), SkillStats::uniform(40.0 + i as f64 * 7.0)))
//!     .collect();
//!
//! let result = run_tournament(TournamentRequest {
//!     roster,
//!     config: None,
//!     rng_seed: Some(42),
//! })
//! .expect("8 is a valid bracket size");
//!
//! println!("Champion: {}", result.champion.competitor.label());
//! for round in &result.rounds {
//!     println!("{}: {} matches", round.name, round.matches.len());
//! }
//! ```

pub mod simulator_engine;

// Convenience re-exports so callers can use `rally_sim::run_tournament`
// directly without reaching into `simulator_engine::`.
pub use simulator_engine::{
    run_tournament, BracketEntry, BracketView, Competitor, GameResult, MatchResult, PointResult,
    Round, SimConfig, SimError, SimTables, Simulator, SkillStats, TournamentRequest,
    TournamentResult,
};
