//! Error types for best-response computation.

use crate::br::config::ConfigError;

/// Errors that can occur during best-response computation.
#[derive(Debug, Clone, PartialEq)]
pub enum BrError {
    /// The exact traversal visited more nodes than the configured budget.
    ///
    /// Raise the limit or switch to the approximate path; the error is not
    /// retried automatically.
    LimitExceeded {
        /// The configured node budget that was exceeded.
        limit: u64,
    },

    /// The responding player index is out of range for the game.
    InvalidPlayer {
        /// The offending player index.
        player: usize,
        /// Number of players in the game.
        num_players: usize,
    },

    /// The strategy profile does not have one seat per player.
    ProfileMismatch {
        /// Number of players in the game.
        expected: usize,
        /// Number of seats in the profile.
        got: usize,
    },

    /// The profile's responding seat does not match the responding player,
    /// or a non-responding seat has no fixed strategy.
    MisplacedResponder {
        /// The seat index that should be the sole responding seat.
        expected: usize,
    },

    /// States aggregated under one information-set key offered differing
    /// legal-action sets.
    ///
    /// This is a consistency error in the game's `InfoState` mapping and is
    /// raised immediately upon detection rather than producing a wrong answer.
    InconsistentInfoSet {
        /// The offending information-set key.
        info_key: String,
    },

    /// Exploitability requires a two-player game.
    NotTwoPlayer {
        /// Number of players in the game that was passed.
        num_players: usize,
    },

    /// The configuration failed validation.
    InvalidConfig(ConfigError),
}

impl std::fmt::Display for BrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrError::LimitExceeded { limit } => {
                write!(
                    f,
                    "best-response traversal exceeded the {} node budget; \
                     raise the limit or use the approximate path",
                    limit
                )
            }
            BrError::InvalidPlayer { player, num_players } => {
                write!(
                    f,
                    "player index {} is out of range for a {}-player game",
                    player, num_players
                )
            }
            BrError::ProfileMismatch { expected, got } => {
                write!(
                    f,
                    "strategy profile has {} seats but the game has {} players",
                    got, expected
                )
            }
            BrError::MisplacedResponder { expected } => {
                write!(
                    f,
                    "profile must have exactly one responding seat, at index {}",
                    expected
                )
            }
            BrError::InconsistentInfoSet { info_key } => {
                write!(
                    f,
                    "information set {} aggregates states with differing action sets",
                    info_key
                )
            }
            BrError::NotTwoPlayer { num_players } => {
                write!(
                    f,
                    "exploitability requires a two-player game, got {} players",
                    num_players
                )
            }
            BrError::InvalidConfig(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for BrError {}

impl From<ConfigError> for BrError {
    fn from(err: ConfigError) -> Self {
        BrError::InvalidConfig(err)
    }
}
