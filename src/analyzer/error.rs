extern crate chrono;

use crate::api;
use chrono::{DateTime, Utc};
use std::{error::Error as StdError, fmt, result::Result as StdResult};

#[derive(Debug)]
pub enum Error {
    EmptyHandle,
    InvalidDateFormat(String),
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    UnknownHandle(String),
    Fetch(api::Error),
}

pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyHandle => f.write_str("Please enter a codeforces handle"),
            Error::InvalidDateFormat(s) => write!(
                f,
                "Invalid date {:?}: date must be YYYY-MM-DD or ISO datetime",
                s
            ),
            Error::InvalidRange { from, to } => write!(
                f,
                "From date must be <= To date (got {} > {})",
                from.to_rfc3339(),
                to.to_rfc3339()
            ),
            Error::UnknownHandle(handle) => write!(f, "No codeforces user with handle {}", handle),
            Error::Fetch(err) => write!(f, "Failed to fetch submissions: {}", err),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Fetch(err) => Some(err),
            _ => None,
        }
    }
}

pub(crate) fn fetch_error(handle: &str, err: api::Error) -> Error {
    if err.is_handle_not_found() {
        Error::UnknownHandle(handle.to_string())
    } else {
        Error::Fetch(err)
    }
}
