use std::fmt;
use std::ops::{AddAssign, Index, IndexMut};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Skill ratings
// ---------------------------------------------------------------------------

/// Value used for any skill attribute the caller did not supply.
pub const DEFAULT_STAT: f64 = 50.0;

fn default_stat() -> f64 {
    DEFAULT_STAT
}

/// The six rated attributes, nominally on a 1–99 scale.
///
/// Range is the caller's responsibility; the engine only fills missing fields
/// with [`DEFAULT_STAT`]. The legacy `stat_<name>` keys are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    #[serde(default = "default_stat", alias = "stat_power")]
    pub power: f64,
    #[serde(default = "default_stat", alias = "stat_finesse")]
    pub finesse: f64,
    #[serde(default = "default_stat", alias = "stat_speed")]
    pub speed: f64,
    #[serde(default = "default_stat", alias = "stat_court_iq")]
    pub court_iq: f64,
    #[serde(default = "default_stat", alias = "stat_consistency")]
    pub consistency: f64,
    #[serde(default = "default_stat", alias = "stat_mental")]
    pub mental: f64,
}

impl Default for SkillStats {
    fn default() -> Self {
        SkillStats::uniform(DEFAULT_STAT)
    }
}

impl SkillStats {
    /// Every attribute set to `value`.
    pub fn uniform(value: f64) -> Self {
        SkillStats {
            power: value,
            finesse: value,
            speed: value,
            court_iq: value,
            consistency: value,
            mental: value,
        }
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Power       => self.power,
            Stat::Finesse     => self.finesse,
            Stat::Speed       => self.speed,
            Stat::CourtIq     => self.court_iq,
            Stat::Consistency => self.consistency,
            Stat::Mental      => self.mental,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        let slot = match stat {
            Stat::Power       => &mut self.power,
            Stat::Finesse     => &mut self.finesse,
            Stat::Speed       => &mut self.speed,
            Stat::CourtIq     => &mut self.court_iq,
            Stat::Consistency => &mut self.consistency,
            Stat::Mental      => &mut self.mental,
        };
        *slot = value;
    }

    /// Unweighted average of all six attributes.
    pub fn mean(&self) -> f64 {
        Stat::ALL.iter().map(|&s| self.get(s)).sum::<f64>() / Stat::ALL.len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Power,
    Finesse,
    Speed,
    CourtIq,
    Consistency,
    Mental,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Power,
        Stat::Finesse,
        Stat::Speed,
        Stat::CourtIq,
        Stat::Consistency,
        Stat::Mental,
    ];

    /// Canonical snake_case key, matching the serialized field name.
    pub fn key(self) -> &'static str {
        match self {
            Stat::Power       => "power",
            Stat::Finesse     => "finesse",
            Stat::Speed       => "speed",
            Stat::CourtIq     => "court_iq",
            Stat::Consistency => "consistency",
            Stat::Mental      => "mental",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stat::Power       => "Power",
            Stat::Finesse     => "Finesse",
            Stat::Speed       => "Speed",
            Stat::CourtIq     => "Court IQ",
            Stat::Consistency => "Consistency",
            Stat::Mental      => "Mental Toughness",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Competitors
// ---------------------------------------------------------------------------

/// A rated entrant. Treated as read-only input; the bracket builder only ever
/// writes `seed` on its own working copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: Option<String>,
    #[serde(default)]
    pub stats: SkillStats,
    /// Caller-supplied strength metric used for seeding. Falls back to the
    /// mean of `stats` when absent.
    pub overall: Option<f64>,
    /// Lower is stronger.
    pub seed: Option<u32>,
}

impl Competitor {
    pub fn new(name: impl Into<String>, stats: SkillStats) -> Self {
        Competitor {
            name: Some(name.into()),
            stats,
            overall: None,
            seed: None,
        }
    }

    pub fn with_overall(mut self, overall: f64) -> Self {
        self.overall = Some(overall);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Display name, or `"Unnamed"` when the caller gave none.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }

    pub fn strength(&self) -> f64 {
        self.overall.unwrap_or_else(|| self.stats.mean())
    }
}

// ---------------------------------------------------------------------------
// Sides and per-side bookkeeping
// ---------------------------------------------------------------------------

/// Which competitor of a game or match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player1 => write!(f, "Player 1"),
            Side::Player2 => write!(f, "Player 2"),
        }
    }
}

/// Role within a single rally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Server,
    Receiver,
}

/// One value per side, indexable by [`Side`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePair<T> {
    pub player1: T,
    pub player2: T,
}

impl<T> SidePair<T> {
    pub fn new(player1: T, player2: T) -> Self {
        SidePair { player1, player2 }
    }
}

impl<T> Index<Side> for SidePair<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }
}

impl<T> IndexMut<Side> for SidePair<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player1 => &mut self.player1,
            Side::Player2 => &mut self.player2,
        }
    }
}

/// Per-stat credit tally. Commentary and analytics only; never feeds back
/// into outcome math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatImpact {
    pub power: u32,
    pub finesse: u32,
    pub speed: u32,
    pub court_iq: u32,
    pub consistency: u32,
    pub mental: u32,
}

impl StatImpact {
    pub fn credit(&mut self, stat: Stat) {
        match stat {
            Stat::Power       => self.power += 1,
            Stat::Finesse     => self.finesse += 1,
            Stat::Speed       => self.speed += 1,
            Stat::CourtIq     => self.court_iq += 1,
            Stat::Consistency => self.consistency += 1,
            Stat::Mental      => self.mental += 1,
        }
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Power       => self.power,
            Stat::Finesse     => self.finesse,
            Stat::Speed       => self.speed,
            Stat::CourtIq     => self.court_iq,
            Stat::Consistency => self.consistency,
            Stat::Mental      => self.mental,
        }
    }

    pub fn total(&self) -> u32 {
        Stat::ALL.iter().map(|&s| self.get(s)).sum()
    }
}

impl AddAssign for StatImpact {
    fn add_assign(&mut self, rhs: StatImpact) {
        self.power += rhs.power;
        self.finesse += rhs.finesse;
        self.speed += rhs.speed;
        self.court_iq += rhs.court_iq;
        self.consistency += rhs.consistency;
        self.mental += rhs.mental;
    }
}

impl AddAssign for SidePair<StatImpact> {
    fn add_assign(&mut self, rhs: SidePair<StatImpact>) {
        self.player1 += rhs.player1;
        self.player2 += rhs.player2;
    }
}

// ---------------------------------------------------------------------------
// Points and games
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Dink,
    Drive,
    Drop,
    Lob,
    Volley,
    Overhead,
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShotType::Dink     => "dink",
            ShotType::Drive    => "drive",
            ShotType::Drop     => "drop shot",
            ShotType::Lob      => "lob",
            ShotType::Volley   => "volley",
            ShotType::Overhead => "overhead smash",
        };
        write!(f, "{}", s)
    }
}

/// Score as seen from the rally: server first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub server_score: u32,
    pub receiver_score: u32,
    pub points_to_win: u32,
}

/// Outcome of one simulated rally. Transient; only its log entry survives
/// in a [`GameResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    pub winner: Role,
    pub loser: Role,
    pub is_clutch: bool,
    /// Server-win probability after perturbation, seed bonus and clamping.
    pub win_probability: f64,
    /// The uniform draw compared against `win_probability`.
    pub draw: f64,
    pub narrative: String,
    pub shot_type: ShotType,
    /// Stats credited to the winner for this point.
    pub impact: StatImpact,
}

impl PointResult {
    pub fn server_won(&self) -> bool {
        self.winner == Role::Server
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLogEntry {
    /// Running score `(player1, player2)` after this point.
    pub score: (u32, u32),
    pub server: Side,
    pub winner: Side,
    pub narrative: String,
    pub shot_type: ShotType,
    pub clutch: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Side,
    pub loser: Side,
    /// Final score `(player1, player2)`.
    pub score: (u32, u32),
    pub points: Vec<PointLogEntry>,
    pub impact: SidePair<StatImpact>,
    /// Most recent clutch points, oldest first.
    pub key_moments: Vec<PointLogEntry>,
}

impl GameResult {
    pub fn total_points(&self) -> u32 {
        self.points.len() as u32
    }

    /// `"11-7"` from player 1's perspective.
    pub fn score_line(&self) -> String {
        format!("{}-{}", self.score.0, self.score.1)
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// A clutch point tagged with the game (1-based) it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMoment {
    pub game_number: u32,
    pub point: PointLogEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Side,
    pub loser: Side,
    pub games_won: SidePair<u32>,
    pub games: Vec<GameResult>,
    pub impact: SidePair<StatImpact>,
    pub total_points: u32,
    pub key_moments: Vec<KeyMoment>,
}

impl MatchResult {
    /// Games tally, e.g. `"2-1"`, from player 1's perspective.
    pub fn score_line(&self) -> String {
        format!("{}-{}", self.games_won.player1, self.games_won.player2)
    }

    /// Per-game scores, e.g. `"11-7, 9-11, 11-5"`.
    pub fn game_scores(&self) -> String {
        self.games.iter().map(GameResult::score_line).collect::<Vec<_>>().join(", ")
    }
}

// ---------------------------------------------------------------------------
// Brackets and tournaments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketEntry {
    pub competitor: Competitor,
    /// 1 = strongest.
    pub seed: u32,
    /// Position in the round-one slot ordering.
    pub slot: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// 1-based within its round.
    pub match_number: u32,
    pub player1: BracketEntry,
    pub player2: BracketEntry,
    pub result: MatchResult,
}

impl BracketMatch {
    pub fn winner(&self) -> &BracketEntry {
        self.entry(self.result.winner)
    }

    pub fn loser(&self) -> &BracketEntry {
        self.entry(self.result.loser)
    }

    fn entry(&self, side: Side) -> &BracketEntry {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based.
    pub number: u32,
    /// "Final", "Semifinals", "Quarterfinals" or "Round of N".
    pub name: String,
    pub matches: Vec<BracketMatch>,
    /// Entrants advanced without playing (padded brackets only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub byes: Vec<BracketEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub champion: BracketEntry,
    pub runner_up: BracketEntry,
    /// Stronger of the two semifinal losers. `None` for a two-entrant bracket.
    pub third_place: Option<BracketEntry>,
    pub rounds: Vec<Round>,
    pub bracket: BracketView,
}

// ---------------------------------------------------------------------------
// Bracket visualisation (derived, read-only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub rounds: Vec<RoundView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub number: u32,
    pub name: String,
    pub matches: Vec<MatchView>,
    /// Entrants advanced without playing (padded brackets only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub byes: Vec<SlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub match_number: u32,
    pub player1: SlotView,
    pub player2: SlotView,
    pub winner: String,
    /// Games tally, e.g. "2-1".
    pub score: String,
    /// Per-game scores, e.g. "11-7, 9-11, 11-5".
    pub game_scores: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub name: String,
    pub seed: u32,
    pub rating: f64,
}

impl From<&BracketEntry> for SlotView {
    fn from(entry: &BracketEntry) -> Self {
        SlotView {
            name: entry.competitor.label().to_string(),
            seed: entry.seed,
            rating: entry.competitor.strength(),
        }
    }
}
