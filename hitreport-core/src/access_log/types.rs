use std::fmt;
use thiserror::Error;

/// One request as written by the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// IP address or hostname; the grouping key
    pub client_source: String,
    /// RFC 1413 identity, almost always "-"
    pub client_id: String,
    /// Authenticated user for protected resources; not to be trusted otherwise
    pub user_id: String,
    /// Bracket contents, kept verbatim
    pub timestamp: String,
    pub method: String,
    pub request_uri: String,
    pub http_version: String,
    pub status_code: u32,
    /// Body size in bytes, "-" is recorded as 0
    pub response_size: u64,
}

/// The positional fields of a common log line, in the order they are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Source,
    ClientId,
    UserId,
    Timestamp,
    RequestLine,
    Status,
    Size,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Source => "source",
            Field::ClientId => "client id",
            Field::UserId => "user id",
            Field::Timestamp => "timestamp",
            Field::RequestLine => "request line",
            Field::Status => "status",
            Field::Size => "size",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("line is empty")]
    Empty,

    #[error("{field}: expected `{delimiter}` before end of line")]
    MissingDelimiter { field: Field, delimiter: char },

    #[error("request line has {found} token(s), expected method, uri and version")]
    MalformedRequestLine { found: usize },

    #[error("status `{value}` is not an integer")]
    InvalidStatus { value: String },

    #[error("response size `{value}` is not an integer")]
    InvalidSize { value: String },
}

impl ParseFailure {
    /// The field that was being read when parsing stopped.
    pub fn field(&self) -> Field {
        match self {
            Self::Empty => Field::Source,
            Self::MissingDelimiter { field, .. } => *field,
            Self::MalformedRequestLine { .. } => Field::RequestLine,
            Self::InvalidStatus { .. } => Field::Status,
            Self::InvalidSize { .. } => Field::Size,
        }
    }
}
