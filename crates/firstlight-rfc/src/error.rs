use thiserror::Error;

/// iCalendar interpretation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Unsupported recurrence rule: {0}")]
    UnsupportedRule(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
