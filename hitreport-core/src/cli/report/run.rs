use crate::access_log::{LogAggregator, ReportSummary};
use crate::conf::ReportOptions;
use crate::source::{LogSource, SourceReadFailure, resolve_sources};
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::panic;
use std::path::Path;
use std::thread;

/// Counters for one run, also what the binary logs on exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sources: usize,
    pub sources_failed: usize,
    pub clients: usize,
    pub lines_parsed: u64,
    pub lines_skipped: u64,
}

pub fn run_report(options: &ReportOptions) -> Result<RunSummary> {
    let (sources, listing_failed) = match resolve_sources(options) {
        Ok(sources) => (sources, 0),
        Err(err) => {
            tracing::warn!(error = %err, "could not list log sources");
            (Vec::new(), 1)
        }
    };

    let collected = collect_sources(&sources, options.marker(), options.jobs());

    let summary = RunSummary {
        sources: sources.len(),
        sources_failed: listing_failed + collected.sources_failed,
        clients: collected.aggregator.groups().len(),
        lines_parsed: collected.aggregator.lines_parsed(),
        lines_skipped: collected.aggregator.lines_skipped(),
    };

    let report = options.formatter().render_report(
        collected.aggregator.groups(),
        &ReportSummary {
            lines_skipped: summary.lines_skipped,
            sources_failed: summary.sources_failed,
        },
    );

    write_report(options.output.as_deref(), &report)?;

    tracing::info!(
        sources = summary.sources,
        sources_failed = summary.sources_failed,
        clients = summary.clients,
        lines_parsed = summary.lines_parsed,
        lines_skipped = summary.lines_skipped,
        "report written"
    );

    Ok(summary)
}

pub struct Collected {
    pub aggregator: LogAggregator,
    pub sources_failed: usize,
}

/// Reads every source into its own aggregator, then merges them left to right in
/// `sources` order.
///
/// With `jobs > 1`, contiguous runs of sources are read on scoped threads. Each thread
/// owns the aggregators it builds, so nothing is shared until the merge.
pub fn collect_sources(sources: &[LogSource], marker: Option<&str>, jobs: usize) -> Collected {
    let results: Vec<Result<LogAggregator, SourceReadFailure>> = if jobs <= 1 || sources.len() <= 1 {
        sources.iter().map(|s| aggregate_source(s, marker)).collect()
    } else {
        let chunk_size = sources.len().div_ceil(jobs);

        thread::scope(|scope| {
            let handles: Vec<_> = sources
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|s| aggregate_source(s, marker))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|p| panic::resume_unwind(p)))
                .collect()
        })
    };

    let mut aggregator = LogAggregator::new();
    let mut sources_failed = 0;

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(partial) => aggregator = aggregator.merge(partial),
            Err(err) => {
                tracing::warn!(%source, error = %err, "skipping unreadable source");
                sources_failed += 1;
            }
        }
    }

    Collected {
        aggregator,
        sources_failed,
    }
}

fn aggregate_source(
    source: &LogSource,
    marker: Option<&str>,
) -> Result<LogAggregator, SourceReadFailure> {
    tracing::debug!(%source, "reading source");

    let mut aggregator = LogAggregator::new();
    for line in source.lines(marker)? {
        let line = line.map_err(|e| SourceReadFailure::read(source.to_string(), e))?;
        aggregator.ingest_line(&line);
    }

    tracing::info!(
        %source,
        parsed = aggregator.lines_parsed(),
        skipped = aggregator.lines_skipped(),
        "source processed"
    );

    Ok(aggregator)
}

fn write_report(output: Option<&Path>, report: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, report)
            .with_context(|| format!("failed to write report to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(report.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write report to stdout")
        }
    }
}
