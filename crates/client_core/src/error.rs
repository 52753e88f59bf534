use chrono::NaiveDate;
use thiserror::Error;

/// How a failure reached the user: caught locally, reported by the backend,
/// or never got an answer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Application,
    Transport,
}

#[derive(Debug, Clone, Error)]
pub enum BookingError {
    #[error("Please select a date first")]
    MissingDate,
    #[error("date {date} is before the earliest bookable date {min}")]
    DateBeforeMinimum { date: NaiveDate, min: NaiveDate },
    #[error("{message}")]
    Application { status: u16, message: String },
    #[error("could not reach booking service: {0}")]
    Transport(String),
    #[error("unexpected response from booking service: {0}")]
    MalformedResponse(String),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDate | Self::DateBeforeMinimum { .. } => ErrorKind::Validation,
            Self::Application { .. } => ErrorKind::Application,
            Self::Transport(_) | Self::MalformedResponse(_) => ErrorKind::Transport,
        }
    }

    pub(crate) fn fallback_message(status: u16) -> String {
        format!("booking service returned status {status}")
    }
}

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
