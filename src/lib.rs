// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Finality - final-method candidate analysis
//!
//! This library post-processes the override-tracking log emitted by a
//! compiler-instrumentation pass across a whole build, and computes the
//! virtual methods that were declared but never overridden in any
//! translation unit. Those are the candidates for `final` marking.

pub mod aggregator;
pub mod filters;
pub mod log_reader;
pub mod logging;
pub mod natural_sort;
pub mod report;

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Re-export commonly used items
pub use aggregator::{Aggregator, Candidate};
pub use filters::{Exclusion, ExclusionCounts, PathFilter};
pub use log_reader::{classify_line, LogLine};
pub use logging::RunLog;
pub use natural_sort::{natural_key, sort_candidates};
pub use report::{write_report, write_report_file};

/// The aggregated log the instrumentation pass appends to during the build.
pub const METHOD_LOG_PATH: &str = "workdir/loplugin.finalmethods.log";

/// The results file this tool overwrites on every run.
pub const RESULTS_PATH: &str = "compilerplugins/clang/finalmethods.results";

/// Counters from one full pass over the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisStats {
    pub lines_read: usize,
    pub malformed_lines: usize,
    /// Distinct method keys with a definition record.
    pub definitions: usize,
    /// Distinct method keys with an override record.
    pub overrides: usize,
    /// Per-rule tallies for never-overridden methods dropped by the filter.
    pub excluded: ExclusionCounts,
}

/// The filtered, sorted candidates plus the run counters.
#[derive(Debug)]
pub struct Analysis {
    pub candidates: Vec<Candidate>,
    pub stats: AnalysisStats,
}

fn consume_line(line: &str, aggregator: &mut Aggregator, stats: &mut AnalysisStats) {
    stats.lines_read += 1;
    let classified = classify_line(line);
    if matches!(classified, LogLine::Malformed) {
        stats.malformed_lines += 1;
        eprintln!("unknown line: {line}");
    }
    aggregator.record(&classified);
}

fn finish(aggregator: Aggregator, mut stats: AnalysisStats) -> Analysis {
    stats.definitions = aggregator.definition_count();
    stats.overrides = aggregator.override_count();

    let filter = PathFilter::new();
    let (mut candidates, excluded) = filter.apply(aggregator.never_overridden());
    stats.excluded = excluded;

    sort_candidates(&mut candidates);
    Analysis { candidates, stats }
}

/// Run the full pipeline (aggregate, set-difference, filter, sort) over
/// already-split log lines. Malformed lines are warned about on stderr and
/// counted, never fatal.
pub fn analyze_lines<'a, I>(lines: I) -> Analysis
where
    I: IntoIterator<Item = &'a str>,
{
    let mut aggregator = Aggregator::new();
    let mut stats = AnalysisStats::default();
    for line in lines {
        consume_line(line, &mut aggregator, &mut stats);
    }
    finish(aggregator, stats)
}

/// Run the full pipeline over a log file. A missing or unreadable file is
/// fatal; nothing is written in that case.
pub fn analyze_log_file(path: &Path) -> Result<Analysis> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open method log: {}", path.display()))?;
    let mut aggregator = Aggregator::new();
    let mut stats = AnalysisStats::default();
    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("Failed to read method log: {}", path.display()))?;
        consume_line(&line, &mut aggregator, &mut stats);
    }
    Ok(finish(aggregator, stats))
}

/// Format a number with comma separators for readability
///
/// Examples:
/// - 1234 -> "1,234"
/// - 156036 -> "156,036"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for c in s.chars().rev() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
        count += 1;
    }

    result.chars().rev().collect()
}
