use bracket::BracketError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("encoding error: {0}")]
    Encode(#[from] postcard::Error),

    #[error("sink rejected message: {0}")]
    Sink(String),

    #[error("bracket error: {0}")]
    Bracket(#[from] BracketError),

    #[error("match did not finish within {elapsed_ms} ms of play")]
    MatchTimedOut { elapsed_ms: u64 },
}

pub type Result<T> = std::result::Result<T, HostError>;
