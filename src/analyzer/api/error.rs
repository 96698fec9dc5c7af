extern crate reqwest;
extern crate serde_json;

use std::{error::Error as StdError, fmt, result::Result as StdResult};

#[derive(Debug)]
pub struct Error(Box<Inner>);
#[derive(Debug)]
pub enum Kind {
    Builder(reqwest::Error),
    Network(reqwest::Error),
    Timeout(reqwest::Error),
    Status(reqwest::StatusCode),
    Decode(serde_json::Error),
    Api,
}
#[derive(Debug)]
struct Inner {
    kind: Kind,
    description: Option<String>,
}

pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            Kind::Builder(err) => write!(f, "Error building client: {}", err),
            Kind::Network(err) => write!(f, "Error sending request: {}", err),
            Kind::Timeout(err) => write!(f, "Request timed out: {}", err),
            Kind::Status(code) => write!(f, "Bad response status: {}", code),
            Kind::Decode(err) => write!(f, "Malformed response: {}", err),
            Kind::Api => {
                write!(f, "Codeforces API error")?;
                self.write_description(f)
            }
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.0.kind {
            Kind::Builder(x) | Kind::Network(x) | Kind::Timeout(x) => Some(x),
            Kind::Decode(x) => Some(x),
            Kind::Status(_) | Kind::Api => None,
        }
    }
}
impl Error {
    fn new(inner: Inner) -> Self {
        Self(Box::new(inner))
    }
    pub(crate) fn with_kind(kind: Kind) -> Self {
        Self::new(Inner {
            kind,
            description: None,
        })
    }
    pub(crate) fn with_description<T: Into<String>>(kind: Kind, description: T) -> Self {
        Self::new(Inner {
            kind,
            description: Some(description.into()),
        })
    }
    /// A `FAILED` answer from the service, for sources other than [`crate::api::Client`].
    pub fn failed<T: Into<String>>(comment: T) -> Self {
        Self::with_description(Kind::Api, comment)
    }
    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }
    /// The `comment` field of a `FAILED` envelope, if the service sent one.
    pub fn comment(&self) -> Option<&str> {
        match self.0.kind {
            Kind::Api => self.0.description.as_deref(),
            _ => None,
        }
    }
    pub fn is_handle_not_found(&self) -> bool {
        self.comment()
            .map(|c| c.starts_with("handle") && c.contains("not found"))
            .unwrap_or(false)
    }
    fn write_description(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = &self.0.description {
            write!(f, ": {}", d)
        } else {
            Ok(())
        }
    }
}

pub(crate) fn builder_error(err: reqwest::Error) -> Error {
    Error::with_kind(Kind::Builder(err))
}
pub(crate) fn network_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::with_kind(Kind::Timeout(err))
    } else {
        Error::with_kind(Kind::Network(err))
    }
}
pub(crate) fn status_error(code: reqwest::StatusCode) -> Error {
    Error::with_kind(Kind::Status(code))
}
pub(crate) fn decode_error(err: serde_json::Error) -> Error {
    Error::with_kind(Kind::Decode(err))
}
pub(crate) fn api_error(comment: Option<String>) -> Error {
    match comment {
        Some(c) => Error::with_description(Kind::Api, c),
        None => Error::with_kind(Kind::Api),
    }
}
