use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidConfigReason {
    #[error("width is outside the allowed range")]
    WidthOutOfRange,
    #[error("height is outside the allowed range")]
    HeightOutOfRange,
    #[error("too few mines")]
    TooFewMines,
    #[error("too many mines for the board size")]
    TooManyMines,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game config: {0}")]
    InvalidConfig(InvalidConfigReason),
    #[error("Coordinates out of range")]
    IndexOutOfRange,
    #[error("Mine placement gave up after {0} draws")]
    GenerationExhausted(u32),
}

impl From<InvalidConfigReason> for GameError {
    fn from(reason: InvalidConfigReason) -> Self {
        Self::InvalidConfig(reason)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
