// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! finality-analyze-methods - report virtual methods never overridden
//!
//! Reads the override-tracking log the instrumentation pass appended during
//! the full build, computes definitions minus overrides, keeps only the
//! declarations visible across linkage units, and writes the results file
//! sorted in natural order.
//! Binary: finality-analyze-methods

use anyhow::{Context, Result};
use finality::{
    analyze_log_file, format_number, write_report_file, RunLog, METHOD_LOG_PATH, RESULTS_PATH,
};
use std::fs;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    let start = Instant::now();
    let mut log = RunLog::new("analyze-methods");

    log.log(&format!("Reading method log: {METHOD_LOG_PATH}"));
    let analysis = analyze_log_file(Path::new(METHOD_LOG_PATH))?;
    let stats = &analysis.stats;

    log.log(&format!("{} lines read", format_number(stats.lines_read)));
    if stats.malformed_lines > 0 {
        log.log(&format!(
            "{} unknown lines skipped (see stderr)",
            format_number(stats.malformed_lines)
        ));
    }
    log.log(&format!(
        "{} methods defined, {} overridden somewhere",
        format_number(stats.definitions),
        format_number(stats.overrides)
    ));

    log.log("");
    log.log("Never-overridden methods dropped by the path rules:");
    let excluded = &stats.excluded;
    log.log(&format!(
        "{:>8} compilation-unit-local",
        format_number(excluded.compilation_unit_local)
    ));
    log.log(&format!("{:>8} test code", format_number(excluded.test_code)));
    log.log(&format!("{:>8} build output", format_number(excluded.build_output)));
    log.log(&format!(
        "{:>8} not in a shared header",
        format_number(excluded.not_shared_header)
    ));
    log.log(&format!("{:>8} runtime API", format_number(excluded.runtime_api)));
    log.log(&format!("{:>8} total", format_number(excluded.total())));
    log.log("");

    let results_path = Path::new(RESULTS_PATH);
    if let Some(parent) = results_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create results directory: {}", parent.display()))?;
    }
    write_report_file(results_path, &analysis.candidates)?;
    log.log(&format!(
        "{} final-method candidates written to {}",
        format_number(analysis.candidates.len()),
        results_path.display()
    ));

    log.finalize(&format!(
        "Summary: {} definitions, {} overridden, {} candidates",
        format_number(stats.definitions),
        format_number(stats.overrides),
        format_number(analysis.candidates.len())
    ));

    println!("Completed in {}ms", start.elapsed().as_millis());

    Ok(())
}
