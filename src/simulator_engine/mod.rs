//! Core simulation engine — ratings, points, games, matches and brackets.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | All shared types: competitors, stats, point/game/match/tournament results |
//! | `config`     | `SimConfig` rules and knobs, JSON loading and validation |
//! | `tables`     | Narrative pools and shot-type weights injected into the point engine |
//! | `rating`     | Situation weight vectors and the effectiveness score |
//! | `point`      | Clutch predicate, win probability and single-rally simulation |
//! | `game`       | Drives points to a finished game under win-by-two / cap rules |
//! | `match_play` | Best-of-N matches built from independent games |
//! | `bracket`    | Roster seeding and standard single-elimination slot ordering |
//! | `tournament` | Round-by-round elimination, placements and bracket view |
//! | `simulator`  | `Simulator` facade and the one-shot `run_tournament()` |
//! | `adapter`    | Edge conversion between loose JSON records and canonical types |
//! | `helpers`    | Small shared utilities (RNG picks, round names, score strings) |
//! | `error`      | `SimError` and the crate `Result` alias |

pub mod adapter;
pub mod bracket;
pub mod config;
pub mod error;
pub mod game;
pub mod helpers;
pub mod match_play;
pub mod models;
pub mod point;
pub mod rating;
pub mod simulator;
pub mod tables;
pub mod tournament;

// Re-export the public API surface so callers can use
// `simulator_engine::run_tournament` without reaching into sub-modules.
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use models::{
    BracketEntry, BracketView, Competitor, GameResult, MatchResult, PointResult, Round,
    SkillStats, TournamentResult,
};
pub use simulator::{run_tournament, Simulator, TournamentRequest};
pub use tables::SimTables;
