use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown application identifier at byte {offset}: {found:?}")]
    UnknownAi { offset: usize, found: String },

    #[error("AI ({ai}) expects {expected} characters, found {found}")]
    Truncated { ai: &'static str, expected: usize, found: usize },

    #[error("AI ({ai}) has an empty value")]
    EmptyValue { ai: &'static str },

    #[error("AI ({ai}) value is {found} characters, at most {max} allowed")]
    ValueTooLong { ai: &'static str, max: usize, found: usize },

    #[error("AI ({ai}) expects digits, found {value:?}")]
    NotNumeric { ai: &'static str, value: String },

    #[error("medicine data has no expiration date")]
    MissingExpiration,

    #[error("invalid expiration date {month}/{year}")]
    InvalidExpiration { month: String, year: String },
}

pub type Result<T> = std::result::Result<T, Error>;
