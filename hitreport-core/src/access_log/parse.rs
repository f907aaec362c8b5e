use crate::access_log::types::{ConnectionRecord, Field, ParseFailure};

/// Placeholder Apache writes for fields it has no value for.
const PLACEHOLDER: &str = "-";

/// Parse one line in the common log layout:
///
/// `<source> <client id> <user id> [<timestamp>] "<method> <uri> <version>" <status> <size>`
///
/// Fields are read strictly left to right. Each step searches for its closing delimiter
/// in what is left of the line, so a missing delimiter is reported for the field being
/// read and the parser never looks past the end of the input.
pub fn parse_line(line: &str) -> Result<ConnectionRecord, ParseFailure> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let mut cursor = Cursor::new(line);

    let client_source = cursor.until(' ', Field::Source)?;
    let client_id = cursor.until(' ', Field::ClientId)?;
    let user_id = cursor.until(' ', Field::UserId)?;
    let timestamp = cursor.enclosed('[', ']', Field::Timestamp)?;
    let request = cursor.enclosed('"', '"', Field::RequestLine)?;

    let (method, request_uri, http_version) = split_request(request)?;

    // The status sits between the space after the closing quote and the next space.
    cursor.until(' ', Field::Status)?;
    let status = cursor.until(' ', Field::Status)?;
    let status_code = status
        .parse::<u32>()
        .map_err(|_| ParseFailure::InvalidStatus {
            value: status.to_string(),
        })?;

    let response_size = parse_size(cursor.rest().trim())?;

    Ok(ConnectionRecord {
        client_source: client_source.to_string(),
        client_id: client_id.to_string(),
        user_id: user_id.to_string(),
        timestamp: timestamp.to_string(),
        method: method.to_string(),
        request_uri: request_uri.to_string(),
        http_version: http_version.to_string(),
        status_code,
        response_size,
    })
}

fn split_request(request: &str) -> Result<(&str, &str, &str), ParseFailure> {
    let tokens: Vec<&str> = request.split_whitespace().collect();

    match tokens.as_slice() {
        [method, uri, version] => Ok((*method, *uri, *version)),
        other => Err(ParseFailure::MalformedRequestLine { found: other.len() }),
    }
}

fn parse_size(raw: &str) -> Result<u64, ParseFailure> {
    if raw == PLACEHOLDER {
        return Ok(0);
    }

    raw.parse::<u64>().map_err(|_| ParseFailure::InvalidSize {
        value: raw.to_string(),
    })
}

/// Forward-only reader over a line.
///
/// `pos` always sits on a char boundary: it only ever advances past an ASCII delimiter.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        self.line.get(self.pos..).unwrap_or_default()
    }

    /// Returns the text up to `delimiter` and moves past the delimiter.
    fn until(&mut self, delimiter: char, field: Field) -> Result<&'a str, ParseFailure> {
        let remaining = self.remaining();
        let idx = remaining
            .find(delimiter)
            .ok_or(ParseFailure::MissingDelimiter { field, delimiter })?;

        self.pos += idx + delimiter.len_utf8();
        Ok(&remaining[..idx])
    }

    /// Skips to the next `open` and returns everything up to the following `close`.
    fn enclosed(&mut self, open: char, close: char, field: Field) -> Result<&'a str, ParseFailure> {
        self.until(open, field)?;
        self.until(close, field)
    }

    fn rest(&mut self) -> &'a str {
        let rest = self.remaining();
        self.pos = self.line.len();
        rest
    }
}
