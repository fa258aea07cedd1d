use std::fmt;

use thiserror::Error;

/// Names a game in error messages: GameId, else Site, else its batch position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameRef {
    Id(String),
    Site(String),
    Index(usize),
    Unknown,
}

impl GameRef {
    pub fn new(game_id: Option<&str>, site: Option<&str>) -> Self {
        match (game_id, site) {
            (Some(id), _) => Self::Id(id.to_string()),
            (None, Some(site)) => Self::Site(site.to_string()),
            (None, None) => Self::Unknown,
        }
    }

    /// Falls back to the 1-based batch position when the game has no identity.
    pub fn or_index(self, index: usize) -> Self {
        match self {
            Self::Unknown => Self::Index(index),
            other => other,
        }
    }
}

impl fmt::Display for GameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "game {id}"),
            Self::Site(site) => write!(f, "game {site}"),
            Self::Index(index) => write!(f, "game #{index}"),
            Self::Unknown => f.write_str("game <unidentified>"),
        }
    }
}

/// Failure of one record in Standardize or Personify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{game}: malformed UTCDate/UTCTime '{date}' '{time}' (chrono: {reason})")]
    MalformedDateTime {
        game: GameRef,
        date: String,
        time: String,
        reason: String,
    },

    #[error("{game}: malformed TimeControl: {reason}")]
    MalformedTimeControl { game: GameRef, reason: String },

    #[error("{game}: player '{player}' is neither White ({white}) nor Black ({black})")]
    PlayerNotFound {
        game: GameRef,
        player: String,
        white: String,
        black: String,
    },
}

impl GameError {
    pub fn game(&self) -> &GameRef {
        match self {
            Self::MalformedDateTime { game, .. }
            | Self::MalformedTimeControl { game, .. }
            | Self::PlayerNotFound { game, .. } => game,
        }
    }

    /// Name of the header field that triggered the failure.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MalformedDateTime { .. } => "UTCDate/UTCTime",
            Self::MalformedTimeControl { .. } => "TimeControl",
            Self::PlayerNotFound { .. } => "White/Black",
        }
    }

    pub fn with_index(self, index: usize) -> Self {
        match self {
            Self::MalformedDateTime {
                game,
                date,
                time,
                reason,
            } => Self::MalformedDateTime {
                game: game.or_index(index),
                date,
                time,
                reason,
            },
            Self::MalformedTimeControl { game, reason } => Self::MalformedTimeControl {
                game: game.or_index(index),
                reason,
            },
            Self::PlayerNotFound {
                game,
                player,
                white,
                black,
            } => Self::PlayerNotFound {
                game: game.or_index(index),
                player,
                white,
                black,
            },
        }
    }
}
