use crate::access_log::ColumnLayout;
use crate::conf::{ConfigError, ReportOptions, load_options, parse_options};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn parse(contents: &str) -> Result<ReportOptions, ConfigError> {
    parse_options(Path::new("hitreport.toml"), contents)
}

#[test]
fn empty_file_yields_defaults() {
    // Act
    let options = parse("").unwrap();

    // Assert
    assert_eq!(options, ReportOptions::default());
    assert_eq!(options.marker(), Some("HTTP/1.1"));
}

#[test]
fn reads_all_fields() {
    // Arrange
    let contents = r#"
        log_dir = "/srv/logs"
        access_glob = "*.log"
        follow_symlinks = true
        recurse = true
        read_gzipped = true
        input_files = ["a.log", "b.log"]
        output = "report.md"
        line_marker = ""
        max_source_width = 40
        layout = "aligned"
        show_connections = true
        jobs = 2
    "#;

    // Act
    let options = parse(contents).unwrap();

    // Assert
    assert_eq!(options.log_dir, PathBuf::from("/srv/logs"));
    assert_eq!(options.access_glob, "*.log");
    assert!(options.follow_symlinks && options.recurse && options.read_gzipped);
    assert_eq!(
        options.input_files,
        vec![PathBuf::from("a.log"), PathBuf::from("b.log")]
    );
    assert_eq!(options.output, Some(PathBuf::from("report.md")));
    assert_eq!(options.marker(), None);
    assert_eq!(options.layout, ColumnLayout::Aligned);
    assert_eq!(options.jobs(), 2);
    assert_eq!(options.formatter().max_source_width(), 40);
}

#[test]
fn rejects_unknown_keys() {
    // Act
    let err = parse("colour = true").unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn rejects_narrow_source_column() {
    // Act
    let err = parse("max_source_width = 3").unwrap_err();

    // Assert
    match err {
        ConfigError::SourceWidthTooSmall { value, min } => {
            assert_eq!(value, 3);
            assert_eq!(min, 6);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_zero_jobs() {
    // Act
    let err = parse("jobs = 0").unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::NoJobs));
}

#[test]
fn rejects_invalid_glob() {
    // Act
    let err = parse(r#"access_glob = "[""#).unwrap_err();

    // Assert
    match err {
        ConfigError::Glob { pattern, .. } => assert_eq!(pattern, "["),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn load_reports_missing_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    // Act
    let err = load_options(&path).unwrap_err();

    // Assert
    match err {
        ConfigError::ReadFile { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn load_reads_file_from_disk() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("hitreport.toml");
    fs::write(&path, "recurse = true\n").unwrap();

    // Act
    let options = load_options(&path).unwrap();

    // Assert
    assert!(options.recurse);
}

#[test]
fn defaults_survive_a_toml_round_trip() {
    // Arrange
    let options = ReportOptions::default();

    // Act
    let text = toml::to_string(&options).unwrap();
    let parsed = parse(&text).unwrap();

    // Assert
    assert_eq!(parsed, options);
}
