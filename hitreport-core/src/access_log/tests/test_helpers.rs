use crate::access_log::{ConnectionRecord, parse_line};

pub(crate) const SAMPLE_LINE: &str =
    r#"127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" 200 2326"#;

pub(crate) fn line(source: &str, status: u32) -> String {
    format!(r#"{source} - - [10/Oct/2023:13:55:36 -0700] "GET / HTTP/1.1" {status} 512"#)
}

pub(crate) fn record(source: &str, status: u32) -> ConnectionRecord {
    parse_line(&line(source, status)).expect("fixture line must parse")
}

pub(crate) fn record_with_uri(source: &str, status: u32, uri: &str) -> ConnectionRecord {
    ConnectionRecord {
        request_uri: uri.to_string(),
        ..record(source, status)
    }
}
