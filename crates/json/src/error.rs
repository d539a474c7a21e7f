use thiserror::Error;

/// Parse failure with the byte offset where it was detected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonError {
    #[error("invalid JSON at byte {0}")]
    Invalid(usize),
    #[error("unexpected end of input")]
    Eof,
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),
    #[error("trailing input at byte {0}")]
    TrailingInput(usize),
}
