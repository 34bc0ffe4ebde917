//! Edge conversion between loosely shaped JSON and the engine's types.
//!
//! Member records arrive from storage in more than one shape: stats may be
//! flat (`stat_power`, `power`) or nested under `stats`, names and ratings
//! under several keys. Everything is normalised here into a canonical
//! [`Competitor`]; nothing inside the engine reads raw JSON.
//!
//! Lookup mirrors the storage layer's "first truthy key wins" rule: a key
//! that is missing, `null`, `false` or `0` falls through to the next, and a
//! stat with no usable key becomes [`DEFAULT_STAT`].

use serde_json::{json, Map, Value};

use crate::simulator_engine::{
    error::{Result, SimError},
    models::{BracketEntry, BracketView, Competitor, SkillStats, Stat, TournamentResult, DEFAULT_STAT},
};

const NAME_KEYS: &[&str] = &["name", "display_name", "username", "id"];
const OVERALL_KEYS: &[&str] = &["overall_rating", "overall"];

fn stat_keys(stat: Stat) -> &'static [&'static str] {
    match stat {
        Stat::Power       => &["stat_power", "power"],
        Stat::Finesse     => &["stat_finesse", "finesse"],
        Stat::Speed       => &["stat_speed", "speed"],
        Stat::CourtIq     => &["stat_court_iq", "court_iq", "courtIq"],
        Stat::Consistency => &["stat_consistency", "consistency"],
        Stat::Mental      => &["stat_mental", "mental", "mental_toughness"],
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy<'v, 'k>(
    record: &'v Map<String, Value>, keys: &[&'k str],
) -> Option<(&'k str, &'v Value)> {
    keys.iter()
        .find_map(|&key| record.get(key).filter(|v| is_truthy(v)).map(|v| (key, v)))
}

/// Numbers, or strings holding a number (`"80"`), as storage often sends.
fn number(key: &str, v: &Value) -> Result<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|f| f.is_finite())
        .ok_or_else(|| SimError::InvalidCompetitor(format!("`{key}` is not a number: {v}")))
}

fn read_stats(record: &Map<String, Value>) -> Result<SkillStats> {
    // A nested `stats` object takes precedence over flat keys.
    let source = match record.get("stats") {
        Some(Value::Object(nested)) => nested,
        _ => record,
    };
    let mut stats = SkillStats::uniform(DEFAULT_STAT);
    for stat in Stat::ALL {
        if let Some((key, v)) = first_truthy(source, stat_keys(stat)) {
            stats.set(stat, number(key, v)?);
        }
    }
    Ok(stats)
}

/// Normalise one member record into a [`Competitor`].
pub fn competitor_from_json(value: &Value) -> Result<Competitor> {
    let record = value
        .as_object()
        .ok_or_else(|| SimError::InvalidCompetitor(format!("expected an object, got {value}")))?;

    let name = first_truthy(record, NAME_KEYS).map(|(_, v)| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });
    let overall = first_truthy(record, OVERALL_KEYS)
        .map(|(key, v)| number(key, v))
        .transpose()?;
    let seed = match first_truthy(record, &["seed"]) {
        Some((_, v)) => Some(
            v.as_u64()
                .and_then(|s| u32::try_from(s).ok())
                .ok_or_else(|| SimError::InvalidCompetitor(format!("`seed` is not a rank: {v}")))?,
        ),
        None => None,
    };

    Ok(Competitor { name, stats: read_stats(record)?, overall, seed })
}

/// Normalise a JSON array of member records.
pub fn roster_from_json(value: &Value) -> Result<Vec<Competitor>> {
    let items = value
        .as_array()
        .ok_or_else(|| SimError::InvalidCompetitor(format!("expected an array of records, got {value}")))?;
    items.iter().map(competitor_from_json).collect()
}

/// Parse a JSON document holding an array of member records.
pub fn roster_from_str(json: &str) -> Result<Vec<Competitor>> {
    let value: Value = serde_json::from_str(json)?;
    roster_from_json(&value)
}

fn entry_json(entry: &BracketEntry) -> Value {
    json!({
        "name": entry.competitor.label(),
        "seed": entry.seed,
        "rating": entry.competitor.strength(),
    })
}

/// UI-facing projection of a bracket: rounds of `{ player1, player2,
/// winner, score, gameScores }` cards.
pub fn bracket_view_json(view: &BracketView) -> Value {
    let rounds: Vec<Value> = view
        .rounds
        .iter()
        .map(|round| {
            let matches: Vec<Value> = round
                .matches
                .iter()
                .map(|m| {
                    json!({
                        "matchNumber": m.match_number,
                        "player1": { "name": m.player1.name, "seed": m.player1.seed, "rating": m.player1.rating },
                        "player2": { "name": m.player2.name, "seed": m.player2.seed, "rating": m.player2.rating },
                        "winner": m.winner,
                        "score": m.score,
                        "gameScores": m.game_scores,
                    })
                })
                .collect();
            let byes: Vec<Value> = round
                .byes
                .iter()
                .map(|b| json!({ "name": b.name, "seed": b.seed, "rating": b.rating }))
                .collect();
            json!({ "round": round.number, "name": round.name, "matches": matches, "byes": byes })
        })
        .collect();
    Value::Array(rounds)
}

/// Compact summary suitable for a results page or a database row.
pub fn tournament_summary_json(result: &TournamentResult) -> Value {
    json!({
        "champion": entry_json(&result.champion),
        "runnerUp": entry_json(&result.runner_up),
        "thirdPlace": result.third_place.as_ref().map(entry_json),
        "rounds": result.rounds.len(),
        "bracket": bracket_view_json(&result.bracket),
    })
}
