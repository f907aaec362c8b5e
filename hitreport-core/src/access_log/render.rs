use crate::access_log::aggregate::{ClientGroup, ClientGroups};
use crate::access_log::status::TrackedStatus;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const SOURCE_HEADER: &str = "Source";
pub const COUNT_COLUMN_WIDTH: usize = 11;
pub const DEFAULT_MAX_SOURCE_WIDTH: usize = 80;
pub const TABLE_RULE: &str = "----------";

const REPORT_TITLE: &str = "# HTTPD Report";

const CONNECTION_HEADERS: [&str; 9] = [
    "Source",
    "Client ID",
    "User ID",
    "Timestamp",
    "Method",
    "URI",
    "Version",
    "Status",
    "Size",
];

/// How the width of the source column is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnLayout {
    /// Each table sizes its source column for its own client.
    #[default]
    PerTable,
    /// One width shared by every table, taken from the widest fitting source.
    Aligned,
}

/// Counters the report mentions below the tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub lines_skipped: u64,
    pub sources_failed: usize,
}

impl ReportSummary {
    fn is_clean(&self) -> bool {
        self.lines_skipped == 0 && self.sources_failed == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFormatter {
    max_source_width: usize,
    layout: ColumnLayout,
    show_connections: bool,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SOURCE_WIDTH)
    }
}

impl ReportFormatter {
    /// `max_source_width` is raised to the header label length if it is smaller.
    pub fn new(max_source_width: usize) -> Self {
        Self {
            max_source_width: max_source_width.max(SOURCE_HEADER.len()),
            layout: ColumnLayout::default(),
            show_connections: false,
        }
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_connections(mut self, show_connections: bool) -> Self {
        self.show_connections = show_connections;
        self
    }

    pub fn max_source_width(&self) -> usize {
        self.max_source_width
    }

    /// Full report: heading, one table per client, then a note about anything skipped.
    pub fn render_report(&self, groups: &ClientGroups, summary: &ReportSummary) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{REPORT_TITLE}");
        let _ = writeln!(out, "## Total Unique IPs: {}", groups.len());
        out.push('\n');

        out.push_str(&self.render(groups));

        if !summary.is_clean() {
            let _ = writeln!(
                out,
                "_Skipped {} malformed line(s) and {} unreadable source(s)._",
                summary.lines_skipped, summary.sources_failed
            );
        }

        out
    }

    /// One table per client group, in discovery order.
    pub fn render(&self, groups: &ClientGroups) -> String {
        let shared_width = match self.layout {
            ColumnLayout::PerTable => None,
            ColumnLayout::Aligned => Some(self.widest_source(groups)),
        };

        let mut out = String::new();
        for group in groups {
            let width = shared_width.unwrap_or_else(|| self.source_column_width(group.source()));
            self.render_group(&mut out, group, width);
        }
        out
    }

    /// Source column width for a table holding only `source`.
    ///
    /// Sources longer than the header label widen the column up to the cap. Shorter
    /// ones get the header label plus one space either side.
    pub fn source_column_width(&self, source: &str) -> usize {
        self.fit(display_width(source))
    }

    /// Source column width shared by all tables.
    ///
    /// Sources are scanned in discovery order. A source longer than the cap stops any
    /// further widening, and reaching the cap exactly ends the scan.
    pub fn widest_source(&self, groups: &ClientGroups) -> usize {
        let mut widest = 0;

        for group in groups {
            let len = display_width(group.source());
            if len > self.max_source_width {
                break;
            }

            widest = widest.max(len);
            if widest == self.max_source_width {
                break;
            }
        }

        self.fit(widest)
    }

    fn fit(&self, len: usize) -> usize {
        if len > SOURCE_HEADER.len() {
            len.min(self.max_source_width)
        } else {
            SOURCE_HEADER.len() + 2
        }
    }

    fn render_group(&self, out: &mut String, group: &ClientGroup, width: usize) {
        // header
        out.push('|');
        out.push_str(&center(SOURCE_HEADER, width));
        for status in TrackedStatus::ALL {
            out.push('|');
            out.push_str(&center(&status.label(), COUNT_COLUMN_WIDTH));
        }
        out.push_str("|\n");

        // separator
        out.push('|');
        out.push_str(&"-".repeat(width));
        for _ in TrackedStatus::ALL {
            out.push('|');
            out.push_str(&"-".repeat(COUNT_COLUMN_WIDTH));
        }
        out.push_str("|\n");

        // counts
        out.push('|');
        out.push_str(group.source());
        out.push_str(&" ".repeat(width.saturating_sub(display_width(group.source()))));
        for (_, count) in group.tally().iter() {
            out.push('|');
            out.push_str(&center(&count.to_string(), COUNT_COLUMN_WIDTH));
        }
        out.push_str("|\n");

        if self.show_connections {
            out.push('\n');
            render_connections(out, group);
        }

        out.push('\n');
        out.push_str(TABLE_RULE);
        out.push_str("\n\n");
    }
}

/// Centres `text` in `width` columns, extra space going to the right.
///
/// Text wider than `width` is returned unpadded.
pub fn center(text: &str, width: usize) -> String {
    let len = display_width(text);
    let pad_left = width.saturating_sub(len) / 2;
    let pad_right = width.saturating_sub(pad_left + len);

    let mut out = String::with_capacity(width.max(len));
    out.push_str(&" ".repeat(pad_left));
    out.push_str(text);
    out.push_str(&" ".repeat(pad_right));
    out
}

fn render_connections(out: &mut String, group: &ClientGroup) {
    out.push('|');
    out.push_str(&CONNECTION_HEADERS.join("|"));
    out.push_str("|\n");
    out.push_str(&"|---".repeat(CONNECTION_HEADERS.len()));
    out.push_str("|\n");

    for record in group.records() {
        let _ = writeln!(
            out,
            "|{}|{}|{}|{}|{}|{}|{}|{}|{}|",
            escape_cell(&record.client_source),
            escape_cell(&record.client_id),
            escape_cell(&record.user_id),
            escape_cell(&record.timestamp),
            escape_cell(&record.method),
            escape_cell(&record.request_uri),
            escape_cell(&record.http_version),
            record.status_code,
            record.response_size,
        );
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}
