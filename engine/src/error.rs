use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("party level {0} is outside 1..=20")]
    InvalidPartyLevel(i64),
    #[error("party size {0} is outside 1..=10")]
    InvalidPartySize(i64),
    #[error("monster count for CR '{0}' must be at least 1")]
    InvalidMonsterCount(String),
    #[error("unknown challenge rating '{0}'")]
    UnknownChallengeRating(String),
    #[error("invalid search config: {0}")]
    InvalidSearchConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
