//! Full demo of a seeded eight-player tournament.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Single game** — two players, one game, every point printed as it is
//!    scored through the per-point callback.
//!
//! 2. **Tournament** — eight players seeded by strength, best-of-3 matches,
//!    each match reported through the per-match callback, then placements and
//!    the JSON bracket summary.
//!
//! The RNG seed is fixed, so the output is identical on every run.

use rally_sim::simulator_engine::adapter::tournament_summary_json;
use rally_sim::{Competitor, SimConfig, Simulator, SkillStats};

fn player(name: &str, power: f64, finesse: f64, speed: f64, court_iq: f64, consistency: f64, mental: f64) -> Competitor {
    Competitor::new(name, SkillStats { power, finesse, speed, court_iq, consistency, mental })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let roster = vec![
        player("Ava Banger",   88.0, 55.0, 70.0, 62.0, 60.0, 66.0),
        player("Dink Master",  45.0, 90.0, 58.0, 80.0, 78.0, 70.0),
        player("Steady Eddie", 55.0, 60.0, 60.0, 72.0, 92.0, 80.0),
        player("Quick Kai",    62.0, 58.0, 91.0, 64.0, 60.0, 55.0),
        player("Lobster",      40.0, 76.0, 50.0, 70.0, 66.0, 60.0),
        player("Rookie Rae",   50.0, 48.0, 62.0, 45.0, 50.0, 52.0),
        player("Iron Mind",    58.0, 62.0, 55.0, 68.0, 70.0, 95.0),
        player("Weekend Walt", 42.0, 45.0, 40.0, 50.0, 48.0, 50.0),
    ];

    let mut sim = Simulator::new(SimConfig::default(), Some(2024))?;

    println!("── Exhibition game ───────────────────────────────────────────────");
    let game = sim.simulate_game_with(&roster[0], &roster[1], |p| {
        let flag = if p.clutch { " [clutch]" } else { "" };
        println!("{:>2}-{:<2} {} ({}){}", p.score.0, p.score.1, p.narrative, p.shot_type, flag);
    });
    println!("Final: {} ({} points)\n", game.score_line(), game.total_points());

    println!("── Tournament ────────────────────────────────────────────────────");
    let result = sim.run_tournament_with(&roster, |m| {
        println!(
            "R{} M{}: #{} {} vs #{} {} → {} ({})",
            m.round,
            m.match_number,
            m.player1.seed,
            m.player1.competitor.label(),
            m.player2.seed,
            m.player2.competitor.label(),
            m.winner.competitor.label(),
            m.score,
        );
    })?;

    println!();
    println!("Champion:    {}", result.champion.competitor.label());
    println!("Runner-up:   {}", result.runner_up.competitor.label());
    if let Some(third) = &result.third_place {
        println!("Third place: {}", third.competitor.label());
    }

    println!("\n{}", serde_json::to_string_pretty(&tournament_summary_json(&result))?);
    Ok(())
}
