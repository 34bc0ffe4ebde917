//! Single-elimination tournament driver.
//!
//! The strict entry point ([`TournamentRunner::run`]) requires a power-of-two
//! roster and fails before any simulation if it is not. Padding with byes is
//! available separately through [`TournamentRunner::run_with_byes`].
//!
//! Placements:
//! - champion: the last entrant standing
//! - runner-up: loser of the final
//! - third place: the higher-rated semifinal loser (earlier slot on a tie)

use rand::Rng;
use tracing::{debug, info};

use crate::simulator_engine::{
    bracket::{build_bracket, build_padded_bracket, is_valid_bracket_size, seed_roster},
    config::SimConfig,
    error::{Result, SimError},
    helpers::round_name,
    match_play::MatchEngine,
    models::{
        BracketEntry, BracketMatch, BracketView, Competitor, MatchView, Round, RoundView,
        SlotView, TournamentResult,
    },
    tables::SimTables,
};

/// Reported to the per-match callback as each match finishes.
#[derive(Debug, Clone)]
pub struct MatchEvent<'m> {
    pub round: u32,
    pub match_number: u32,
    pub player1: &'m BracketEntry,
    pub player2: &'m BracketEntry,
    pub winner: &'m BracketEntry,
    /// Games tally, e.g. "2-1".
    pub score: String,
}

pub struct TournamentRunner<'a> {
    config: &'a SimConfig,
    matches: MatchEngine<'a>,
}

impl<'a> TournamentRunner<'a> {
    pub fn new(config: &'a SimConfig, tables: &'a SimTables) -> Self {
        TournamentRunner { config, matches: MatchEngine::new(config, tables) }
    }

    pub fn run<R: Rng>(&self, rng: &mut R, competitors: &[Competitor]) -> Result<TournamentResult> {
        self.run_with(rng, competitors, |_| {})
    }

    /// Seed, bracket and play out `competitors`, calling `on_match` after
    /// every match.
    pub fn run_with<R: Rng, F: FnMut(&MatchEvent<'_>)>(
        &self, rng: &mut R, competitors: &[Competitor], on_match: F,
    ) -> Result<TournamentResult> {
        let size = competitors.len();
        if size < 2 {
            return Err(SimError::InsufficientRoster { size });
        }
        if !is_valid_bracket_size(size) {
            return Err(SimError::InvalidBracketSize { size });
        }
        self.config.validate()?;

        let slots = build_bracket(&seed_roster(competitors))?;
        self.play_out(rng, slots.into_iter().map(Some).collect(), on_match)
    }

    /// Padded variant: any roster of two or more is topped up to the next
    /// power of two, with the top seeds receiving first-round byes.
    pub fn run_with_byes<R: Rng, F: FnMut(&MatchEvent<'_>)>(
        &self, rng: &mut R, competitors: &[Competitor], on_match: F,
    ) -> Result<TournamentResult> {
        self.config.validate()?;
        let slots = build_padded_bracket(&seed_roster(competitors))?;
        self.play_out(rng, slots, on_match)
    }

    fn play_out<R: Rng, F: FnMut(&MatchEvent<'_>)>(
        &self, rng: &mut R, slots: Vec<Option<BracketEntry>>, mut on_match: F,
    ) -> Result<TournamentResult> {
        let entrants = slots.iter().flatten().count();
        info!(entrants, slots = slots.len(), best_of = self.config.best_of, "tournament starting");

        let mut rounds: Vec<Round> = Vec::new();
        let mut field = slots;

        while field.len() > 1 {
            let number = rounds.len() as u32 + 1;
            let mut round = Round {
                number,
                name: round_name(field.len()),
                matches: Vec::with_capacity(field.len() / 2),
                byes: Vec::new(),
            };
            let mut advancing = Vec::with_capacity(field.len() / 2);

            for pair in field.chunks(2) {
                match (&pair[0], &pair[1]) {
                    (Some(a), Some(b)) => {
                        let result = self.matches.simulate_match(
                            rng,
                            &a.competitor,
                            &b.competitor,
                            self.config.best_of,
                        )?;
                        let bracket_match = BracketMatch {
                            match_number: round.matches.len() as u32 + 1,
                            player1: a.clone(),
                            player2: b.clone(),
                            result,
                        };
                        let event = MatchEvent {
                            round: number,
                            match_number: bracket_match.match_number,
                            player1: &bracket_match.player1,
                            player2: &bracket_match.player2,
                            winner: bracket_match.winner(),
                            score: bracket_match.result.score_line(),
                        };
                        debug!(
                            round = number,
                            match_number = event.match_number,
                            winner = %event.winner.competitor.label(),
                            score = %event.score,
                            "match complete"
                        );
                        on_match(&event);
                        advancing.push(Some(bracket_match.winner().clone()));
                        round.matches.push(bracket_match);
                    }
                    (Some(solo), None) | (None, Some(solo)) => {
                        round.byes.push(solo.clone());
                        advancing.push(Some(solo.clone()));
                    }
                    (None, None) => advancing.push(None),
                }
            }

            rounds.push(round);
            field = advancing;
        }

        let champion = field
            .into_iter()
            .flatten()
            .next()
            .ok_or(SimError::InsufficientRoster { size: entrants })?;
        let runner_up = rounds
            .last()
            .and_then(|r| r.matches.first())
            .map(|m| m.loser().clone())
            .ok_or(SimError::InsufficientRoster { size: entrants })?;
        let third_place = third_place(&rounds);
        let bracket = bracket_view(&rounds);

        info!(
            champion = %champion.competitor.label(),
            runner_up = %runner_up.competitor.label(),
            rounds = rounds.len(),
            "tournament complete"
        );

        Ok(TournamentResult { champion, runner_up, third_place, rounds, bracket })
    }
}

/// Higher-rated loser of the semifinal round, or `None` when there was no
/// semifinal round. Equal ratings go to the earlier bracket slot.
pub fn third_place(rounds: &[Round]) -> Option<BracketEntry> {
    if rounds.len() < 2 {
        return None;
    }
    let semifinal = &rounds[rounds.len() - 2];
    semifinal
        .matches
        .iter()
        .map(BracketMatch::loser)
        .min_by(|a, b| {
            b.competitor
                .strength()
                .total_cmp(&a.competitor.strength())
                .then(a.slot.cmp(&b.slot))
        })
        .cloned()
}

/// Display projection of `rounds`.
pub fn bracket_view(rounds: &[Round]) -> BracketView {
    BracketView {
        rounds: rounds
            .iter()
            .map(|round| RoundView {
                number: round.number,
                name: round.name.clone(),
                matches: round
                    .matches
                    .iter()
                    .map(|m| MatchView {
                        match_number: m.match_number,
                        player1: (&m.player1).into(),
                        player2: (&m.player2).into(),
                        winner: m.winner().competitor.label().to_string(),
                        score: m.result.score_line(),
                        game_scores: m.result.game_scores(),
                    })
                    .collect(),
                byes: round.byes.iter().map(SlotView::from).collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator_engine::models::{Side, SkillStats};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(n: usize) -> Vec<Competitor> {
        (0..n)
            .map(|i| Competitor::new(format!("P{}", i + 1), SkillStats::uniform(90.0 - i as f64 * 5.0)))
            .collect()
    }

    #[test]
    fn rejects_bad_roster_sizes_before_simulating() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(1);
        let mut calls = 0;

        let err = runner.run_with(&mut rng, &roster(6), |_| calls += 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidBracketSize { size: 6 }));
        let err = runner.run_with(&mut rng, &roster(1), |_| calls += 1).unwrap_err();
        assert!(matches!(err, SimError::InsufficientRoster { size: 1 }));
        let err = runner.run(&mut rng, &[]).unwrap_err();
        assert!(matches!(err, SimError::InsufficientRoster { size: 0 }));
        let err = runner.run(&mut rng, &roster(3)).unwrap_err();
        assert!(matches!(err, SimError::InvalidBracketSize { size: 3 }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = SimConfig { best_of: 0, ..SimConfig::default() };
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(runner.run(&mut rng, &roster(4)), Err(SimError::InvalidBestOf { .. })));
    }

    #[test]
    fn rounds_shrink_by_half_with_standard_names() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(99);
        let result = runner.run(&mut rng, &roster(16)).unwrap();

        let shape: Vec<_> = result.rounds.iter().map(|r| (r.name.as_str(), r.matches.len())).collect();
        assert_eq!(
            shape,
            [("Round of 16", 8), ("Quarterfinals", 4), ("Semifinals", 2), ("Final", 1)]
        );
        for (i, round) in result.rounds.iter().enumerate() {
            assert_eq!(round.number as usize, i + 1);
            assert!(round.byes.is_empty());
        }
    }

    #[test]
    fn placements_come_from_the_final() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(3);
        let result = runner.run(&mut rng, &roster(8)).unwrap();

        let final_match = &result.rounds.last().unwrap().matches[0];
        assert_eq!(&result.champion, final_match.winner());
        assert_eq!(&result.runner_up, final_match.loser());
        let third = result.third_place.as_ref().unwrap();
        assert_ne!(third, &result.champion);
        assert_ne!(third, &result.runner_up);
    }

    #[test]
    fn callback_reports_every_match() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(12);
        let mut events = Vec::new();
        let result = runner
            .run_with(&mut rng, &roster(8), |e| {
                events.push((e.round, e.match_number, e.winner.seed, e.score.clone()))
            })
            .unwrap();

        assert_eq!(events.len(), 7);
        let expected: Vec<_> = result
            .rounds
            .iter()
            .flat_map(|r| {
                r.matches
                    .iter()
                    .map(move |m| (r.number, m.match_number, m.winner().seed, m.result.score_line()))
            })
            .collect();
        assert_eq!(events, expected);
    }

    #[test]
    fn winners_advance_in_bracket_order() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(31);
        let result = runner.run(&mut rng, &roster(8)).unwrap();

        for pair in result.rounds.windows(2) {
            let winners: Vec<_> = pair[0].matches.iter().map(|m| m.winner().clone()).collect();
            let entrants: Vec<_> = pair[1]
                .matches
                .iter()
                .flat_map(|m| [m.player1.clone(), m.player2.clone()])
                .collect();
            assert_eq!(winners, entrants);
        }
    }

    #[test]
    fn two_player_bracket_has_no_third_place() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(5);
        let result = runner.run(&mut rng, &roster(2)).unwrap();
        assert_eq!(result.rounds.len(), 1);
        assert_eq!(result.rounds[0].name, "Final");
        assert!(result.third_place.is_none());
    }

    #[test]
    fn byes_pad_odd_rosters() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(8);
        let result = runner.run_with_byes(&mut rng, &roster(5), |_| {}).unwrap();

        let first = &result.rounds[0];
        assert_eq!(first.name, "Quarterfinals");
        assert_eq!(first.matches.len(), 1, "only seeds 4 and 5 play");
        let bye_seeds: Vec<_> = first.byes.iter().map(|e| e.seed).collect();
        assert_eq!(bye_seeds, [1, 2, 3]);
        assert_eq!(result.rounds.len(), 3);
        assert_eq!(result.rounds[1].matches.len(), 2);
        assert!(result.third_place.is_some());

        let view = &result.bracket.rounds[0];
        let view_byes: Vec<_> = view.byes.iter().map(|s| (s.seed, s.name.as_str())).collect();
        assert_eq!(view_byes, [(1, "P1"), (2, "P2"), (3, "P3")]);
        assert!(result.bracket.rounds[1].byes.is_empty());
    }

    #[test]
    fn byes_still_need_two_entrants() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(8);
        let err = runner.run_with_byes(&mut rng, &roster(1), |_| {}).unwrap_err();
        assert!(matches!(err, SimError::InsufficientRoster { size: 1 }));
    }

    fn entry(name: &str, overall: f64, slot: usize) -> BracketEntry {
        BracketEntry {
            competitor: Competitor::new(name, SkillStats::default()).with_overall(overall),
            seed: slot as u32 + 1,
            slot,
        }
    }

    fn decided(number: u32, a: BracketEntry, b: BracketEntry, winner: Side) -> BracketMatch {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let engine = MatchEngine::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(number as u64);
        let mut result = engine.simulate_match(&mut rng, &a.competitor, &b.competitor, 1).unwrap();
        result.winner = winner;
        result.loser = winner.other();
        BracketMatch { match_number: number, player1: a, player2: b, result }
    }

    #[test]
    fn third_place_is_higher_rated_semifinal_loser_regardless_of_order() {
        let semis = |weak_first: bool| {
            let strong_loser = entry("StrongLoser", 80.0, 1);
            let weak_loser = entry("WeakLoser", 55.0, 3);
            let m1 = decided(1, entry("W1", 70.0, 0), strong_loser, Side::Player1);
            let m2 = decided(2, entry("W2", 60.0, 2), weak_loser, Side::Player1);
            let matches = if weak_first { vec![m2, m1] } else { vec![m1, m2] };
            vec![
                Round { number: 1, name: "Semifinals".into(), matches, byes: vec![] },
                Round { number: 2, name: "Final".into(), matches: vec![], byes: vec![] },
            ]
        };
        for weak_first in [false, true] {
            let third = third_place(&semis(weak_first)).unwrap();
            assert_eq!(third.competitor.label(), "StrongLoser");
        }
    }

    #[test]
    fn third_place_tie_goes_to_the_earlier_slot() {
        let semis = |later_first: bool| {
            let early_loser = entry("EarlyLoser", 65.0, 1);
            let late_loser = entry("LateLoser", 65.0, 3);
            let m1 = decided(1, entry("W1", 70.0, 0), early_loser, Side::Player1);
            let m2 = decided(2, entry("W2", 60.0, 2), late_loser, Side::Player1);
            let matches = if later_first { vec![m2, m1] } else { vec![m1, m2] };
            vec![
                Round { number: 1, name: "Semifinals".into(), matches, byes: vec![] },
                Round { number: 2, name: "Final".into(), matches: vec![], byes: vec![] },
            ]
        };
        for later_first in [false, true] {
            let third = third_place(&semis(later_first)).unwrap();
            assert_eq!(third.competitor.label(), "EarlyLoser", "later_first={later_first}");
            assert_eq!(third.slot, 1);
        }
    }

    #[test]
    fn bracket_view_mirrors_rounds() {
        let config = SimConfig::default();
        let tables = SimTables::default();
        let runner = TournamentRunner::new(&config, &tables);
        let mut rng = StdRng::seed_from_u64(44);
        let result = runner.run(&mut rng, &roster(4)).unwrap();

        assert_eq!(result.bracket, bracket_view(&result.rounds));
        let first = &result.bracket.rounds[0].matches[0];
        assert_eq!(first.player1.seed, 1);
        assert_eq!(first.player2.seed, 4);
        let source = &result.rounds[0].matches[0];
        assert_eq!(first.winner, source.winner().competitor.label());
        assert_eq!(first.score, source.result.score_line());
    }
}
