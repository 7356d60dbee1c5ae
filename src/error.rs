// Errors surfaced by the season engine.

pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("unsupported format: {reason}")]
    UnsupportedFormat { reason: String },

    #[error("no threshold found for handicap differential {differential}")]
    NoThresholdFound { differential: i32 },

    #[error("at least one team is required to seed a playoff bracket")]
    InsufficientTeams,

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LeagueError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    pub fn unsupported_format(reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat { reason: reason.into() }
    }
}
