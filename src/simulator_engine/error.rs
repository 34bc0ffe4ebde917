use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// A roster of two or more whose size is not a power of two. The pure
    /// seeding functions also report 0 and 1 this way.
    #[error("Invalid bracket size: {size} (must be a power of two, at least 2)")]
    InvalidBracketSize { size: usize },

    /// Fewer than two entrants at tournament start. Checked before the
    /// power-of-two rule, so it takes precedence over `InvalidBracketSize`.
    #[error("Insufficient roster: {size} competitor(s), at least 2 required")]
    InsufficientRoster { size: usize },

    #[error("Invalid best-of: {best_of} (must be at least 1)")]
    InvalidBestOf { best_of: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid competitor record: {0}")]
    InvalidCompetitor(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
