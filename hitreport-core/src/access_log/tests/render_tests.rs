use crate::access_log::tests::test_helpers::{SAMPLE_LINE, record, record_with_uri};
use crate::access_log::{
    COUNT_COLUMN_WIDTH, ClientGroups, ColumnLayout, DEFAULT_MAX_SOURCE_WIDTH, LogAggregator,
    ReportFormatter, ReportSummary, SOURCE_HEADER, center,
};
use pretty_assertions::assert_eq;

const COUNT_HEADERS: &str = "| Total 200 | Total 204 | Total 301 | Total 400 | Total 401 | Total 403 | Total 404 | Total 500 | Total 503 |";
const COUNT_SEPARATOR: &str = "|-----------|-----------|-----------|-----------|-----------|-----------|-----------|-----------|-----------|";

fn groups_of(sources: &[&str]) -> ClientGroups {
    sources.iter().map(|s| record(s, 200)).collect()
}

//-----------------------------------------------------------------------------
// Centering
//-----------------------------------------------------------------------------

#[test]
fn center_puts_extra_space_on_the_right() {
    assert_eq!(center("1", COUNT_COLUMN_WIDTH), "     1     ");
    assert_eq!(center("12", COUNT_COLUMN_WIDTH), "    12     ");
    assert_eq!(center("Total 200", COUNT_COLUMN_WIDTH), " Total 200 ");
    assert_eq!(center("Source", 9), " Source  ");
}

#[test]
fn center_leaves_oversized_text_alone() {
    assert_eq!(center("123456789012", COUNT_COLUMN_WIDTH), "123456789012");
}

//-----------------------------------------------------------------------------
// Source column width
//-----------------------------------------------------------------------------

#[test]
fn short_source_uses_padded_header_width() {
    // Arrange
    let formatter = ReportFormatter::default();

    // Act
    let width = formatter.source_column_width("::1");

    // Assert
    assert_eq!(width, SOURCE_HEADER.len() + 2);
}

#[test]
fn long_source_widens_column_up_to_cap() {
    // Arrange
    let formatter = ReportFormatter::new(20);

    // Act
    let fits = formatter.source_column_width("192.168.100.200");
    let capped = formatter.source_column_width(&"h".repeat(50));

    // Assert
    assert_eq!(fits, 15);
    assert_eq!(capped, 20);
}

#[test]
fn cap_never_drops_below_header() {
    // Arrange
    let formatter = ReportFormatter::new(2);

    // Assert
    assert_eq!(formatter.max_source_width(), SOURCE_HEADER.len());
}

#[test]
fn widest_source_stops_at_first_source_over_cap() {
    // Arrange
    let formatter = ReportFormatter::new(DEFAULT_MAX_SOURCE_WIDTH);
    let long = "x".repeat(DEFAULT_MAX_SOURCE_WIDTH + 1);
    let later = "y".repeat(30);
    let groups = groups_of(&["10.0.0.1", "longhost.example.com", long.as_str(), later.as_str()]);

    // Act
    let width = formatter.widest_source(&groups);

    // Assert
    assert_eq!(width, "longhost.example.com".len());
}

#[test]
fn widest_source_ends_scan_at_exact_cap() {
    // Arrange
    let formatter = ReportFormatter::new(12);
    let groups = groups_of(&["abcdefghijkl", "abc"]);

    // Act
    let width = formatter.widest_source(&groups);

    // Assert
    assert_eq!(width, 12);
}

#[test]
fn widest_source_of_short_sources_is_padded_header() {
    // Arrange
    let formatter = ReportFormatter::default();

    // Act
    let empty = formatter.widest_source(&ClientGroups::new());
    let short = formatter.widest_source(&groups_of(&["::1", "a"]));

    // Assert
    assert_eq!(empty, SOURCE_HEADER.len() + 2);
    assert_eq!(short, SOURCE_HEADER.len() + 2);
}

//-----------------------------------------------------------------------------
// Tables
//-----------------------------------------------------------------------------

#[test]
fn renders_one_table_per_group() {
    // Arrange
    let mut aggregator = LogAggregator::new();
    aggregator.ingest_line(SAMPLE_LINE);

    // Act
    let text = ReportFormatter::default().render(aggregator.groups());

    // Assert
    let expected = format!(
        "| Source  {COUNT_HEADERS}\n\
         |---------{COUNT_SEPARATOR}\n\
         |127.0.0.1|     1     |     0     |     0     |     0     |     0     |     0     |     0     |     0     |     0     |\n\
         \n\
         ----------\n\
         \n"
    );
    assert_eq!(text, expected);
}

#[test]
fn short_source_is_padded_to_column_width() {
    // Arrange
    let groups: ClientGroups = vec![record("::1", 404), record("::1", 404)]
        .into_iter()
        .collect();

    // Act
    let text = ReportFormatter::default().render(&groups);

    // Assert
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("| Source |"));
    assert!(lines[1].starts_with("|--------|"));
    assert!(lines[2].starts_with("|::1     |"));
    assert!(lines[2].contains("|     2     |"));
}

#[test]
fn tables_follow_discovery_order() {
    // Arrange
    let groups = groups_of(&["10.0.0.9", "10.0.0.1"]);

    // Act
    let text = ReportFormatter::default().render(&groups);

    // Assert
    let first = text.find("|10.0.0.9").unwrap();
    let second = text.find("|10.0.0.1").unwrap();
    assert!(first < second);
    assert_eq!(text.matches("----------\n").count(), 2);
}

#[test]
fn aligned_layout_shares_one_width() {
    // Arrange
    let groups = groups_of(&["::1", "longhost.example.com"]);
    let formatter = ReportFormatter::default().with_layout(ColumnLayout::Aligned);

    // Act
    let text = formatter.render(&groups);

    // Assert
    let width = "longhost.example.com".len();
    let padded_short = format!("|::1{}|", " ".repeat(width - 3));
    assert!(text.contains(&padded_short));
    assert_eq!(text.matches(&format!("|{}|", "-".repeat(width))).count(), 2);
}

#[test]
fn rendering_is_idempotent() {
    // Arrange
    let groups = groups_of(&["10.0.0.1", "::1", "host.example"]);
    let formatter = ReportFormatter::default();

    // Act
    let first = formatter.render(&groups);
    let second = formatter.render(&groups);

    // Assert
    assert_eq!(first, second);
}

#[test]
fn connection_listing_escapes_pipes() {
    // Arrange
    let groups: ClientGroups = vec![record_with_uri("10.0.0.1", 200, "/a|b")]
        .into_iter()
        .collect();
    let formatter = ReportFormatter::default().with_connections(true);

    // Act
    let text = formatter.render(&groups);

    // Assert
    assert!(text.contains("|Source|Client ID|User ID|Timestamp|Method|URI|Version|Status|Size|\n"));
    assert!(text.contains(
        "|10.0.0.1|-|-|10/Oct/2023:13:55:36 -0700|GET|/a\\|b|HTTP/1.1|200|512|\n"
    ));
    assert!(text.ends_with("\n----------\n\n"));
}

//-----------------------------------------------------------------------------
// Full report
//-----------------------------------------------------------------------------

#[test]
fn empty_report_still_has_heading() {
    // Act
    let text = ReportFormatter::default()
        .render_report(&ClientGroups::new(), &ReportSummary::default());

    // Assert
    assert_eq!(text, "# HTTPD Report\n## Total Unique IPs: 0\n\n");
}

#[test]
fn report_mentions_skipped_input() {
    // Arrange
    let groups = groups_of(&["10.0.0.1", "10.0.0.2"]);
    let summary = ReportSummary {
        lines_skipped: 3,
        sources_failed: 1,
    };

    // Act
    let text = ReportFormatter::default().render_report(&groups, &summary);

    // Assert
    assert!(text.starts_with("# HTTPD Report\n## Total Unique IPs: 2\n\n| Source "));
    assert!(text.ends_with(
        "----------\n\n_Skipped 3 malformed line(s) and 1 unreadable source(s)._\n"
    ));
}
