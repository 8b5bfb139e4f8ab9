// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! End-to-end tests for the final-method candidate pipeline.

use finality::{analyze_lines, analyze_log_file, write_report, write_report_file};
use std::fs;

/// Run the whole pipeline over log text and render the results file bytes.
fn run(log_text: &str) -> String {
    let analysis = analyze_lines(log_text.lines());
    let mut out = Vec::new();
    write_report(&mut out, &analysis.candidates).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_scenario() {
    let log = "definition:\tMethodA\tinclude/foo.hxx\n\
               definition:\tMethodB\ttoolkit/inc/bar.hxx\n\
               overridden:\tMethodB\n\
               definition:\tMethodC\tsw/qa/test.hxx\n";
    // MethodB is overridden somewhere, MethodC is declared in test code.
    assert_eq!(run(log), "include/foo.hxx\n    MethodA\n");
}

#[test]
fn test_set_difference() {
    let log = "definition:\tKept\tinclude/a.hxx\n\
               definition:\tDropped\tinclude/b.hxx\n\
               overridden:\tDropped\n\
               overridden:\tNeverDefined\n";
    assert_eq!(run(log), "include/a.hxx\n    Kept\n");
}

#[test]
fn test_last_write_wins() {
    let log = "definition:\tM\tinclude/first.hxx\n\
               definition:\tM\tinclude/second.hxx\n";
    assert_eq!(run(log), "include/second.hxx\n    M\n");
}

#[test]
fn test_idempotence() {
    let log = "definition:\tB\tvcl/inc/b.hxx\n\
               definition:\tA\tinclude/a.hxx\n\
               overridden:\tB\n\
               definition:\tC\ttoolkit/inc/c10.hxx\n\
               definition:\tD\ttoolkit/inc/c2.hxx\n";
    let first = run(log);
    let second = run(log);
    assert_eq!(first, second);
}

#[test]
fn test_input_order_does_not_change_output() {
    let forward = "definition:\tA\tinclude/a.hxx\n\
                   definition:\tB\tvcl/inc/b.hxx\n";
    let reversed = "definition:\tB\tvcl/inc/b.hxx\n\
                    definition:\tA\tinclude/a.hxx\n";
    assert_eq!(run(forward), run(reversed));
}

#[test]
fn test_natural_ordering_of_results() {
    let log = "definition:\tM10\ta/inc/file10.hxx\n\
               definition:\tM2\ta/inc/file2.hxx\n\
               definition:\tM9\ta/inc/file9.hxx\n";
    assert_eq!(
        run(log),
        "a/inc/file2.hxx\n    M2\na/inc/file9.hxx\n    M9\na/inc/file10.hxx\n    M10\n"
    );
}

#[test]
fn test_same_file_orders_by_method_key() {
    let log = "definition:\tzeta\tinclude/foo.hxx\n\
               definition:\talpha\tinclude/foo.hxx:12\n\
               definition:\tbeta\tinclude/foo.hxx:12\n";
    assert_eq!(
        run(log),
        "include/foo.hxx\n    zeta\ninclude/foo.hxx:12\n    alpha\ninclude/foo.hxx:12\n    beta\n"
    );
}

#[test]
fn test_compilation_unit_local_never_reported() {
    let log = "definition:\tM\tsw/source/core/doc.cxx\n";
    assert_eq!(run(log), "");
}

#[test]
fn test_runtime_api_never_reported() {
    let log = "definition:\tM\tinclude/sal/log.hxx\n";
    assert_eq!(run(log), "");
}

#[test]
fn test_module_inc_pattern_inclusion() {
    let log = "definition:\tKept\tvcl/inc/foo.hxx\n\
               definition:\tDropped\tvcl/source/foo.hxx\n";
    assert_eq!(run(log), "vcl/inc/foo.hxx\n    Kept\n");
}

#[test]
fn test_malformed_and_blank_lines_do_not_abort() {
    let log = "definition:\tM\tinclude/foo.hxx\n\
               \n\
               bogus line with no tabs\n\
               mystery:\tM2\tinclude/bar.hxx\n\
               overridden:\n";
    let analysis = analyze_lines(log.lines());
    // Only the unknown tag is malformed; the blank line, the tab-less line,
    // and the lone tag are all single-token lines and silently skipped.
    assert_eq!(analysis.stats.malformed_lines, 1);
    assert_eq!(analysis.stats.lines_read, 5);
    assert_eq!(analysis.candidates.len(), 1);
    assert_eq!(analysis.candidates[0].method, "M");
}

#[test]
fn test_stats_count_distinct_keys() {
    let log = "definition:\tM\tinclude/foo.hxx\n\
               definition:\tM\tinclude/bar.hxx\n\
               definition:\tN\tsw/qa/test.hxx\n\
               overridden:\tN\n\
               overridden:\tN\n";
    let analysis = analyze_lines(log.lines());
    assert_eq!(analysis.stats.definitions, 2);
    assert_eq!(analysis.stats.overrides, 1);
    assert_eq!(analysis.candidates.len(), 1);
}

#[test]
fn test_exclusion_tallies() {
    let log = "definition:\tA\tsw/source/core/doc.cxx\n\
               definition:\tB\tsw/qa/test.hxx\n\
               definition:\tC\tworkdir/gen.hxx\n\
               definition:\tD\tvcl/source/foo.hxx\n\
               definition:\tE\tinclude/rtl/string.hxx\n\
               definition:\tF\tinclude/foo.hxx\n";
    let analysis = analyze_lines(log.lines());
    let excluded = analysis.stats.excluded;
    assert_eq!(excluded.compilation_unit_local, 1);
    assert_eq!(excluded.test_code, 1);
    assert_eq!(excluded.build_output, 1);
    assert_eq!(excluded.not_shared_header, 1);
    assert_eq!(excluded.runtime_api, 1);
    assert_eq!(excluded.total(), 5);
    assert_eq!(analysis.candidates.len(), 1);
}

#[test]
fn test_file_roundtrip() {
    let scratch =
        std::env::temp_dir().join(format!("finality-roundtrip-{}", std::process::id()));
    fs::create_dir_all(&scratch).unwrap();

    let log_path = scratch.join("finalmethods.log");
    let results_path = scratch.join("finalmethods.results");
    fs::write(
        &log_path,
        "definition:\tMethodA\tinclude/foo.hxx\n\
         definition:\tMethodB\ttoolkit/inc/bar.hxx\n\
         overridden:\tMethodB\n",
    )
    .unwrap();

    let analysis = analyze_log_file(&log_path).unwrap();
    write_report_file(&results_path, &analysis.candidates).unwrap();

    let written = fs::read_to_string(&results_path).unwrap();
    assert_eq!(written, "include/foo.hxx\n    MethodA\n");

    // A rerun truncates the prior results.
    let empty = analyze_lines("overridden:\tMethodA\n".lines());
    write_report_file(&results_path, &empty.candidates).unwrap();
    assert_eq!(fs::read_to_string(&results_path).unwrap(), "");

    let _ = fs::remove_dir_all(&scratch);
}

#[test]
fn test_missing_log_file_is_fatal() {
    let missing = std::env::temp_dir()
        .join(format!("finality-missing-{}", std::process::id()))
        .join("no-such.log");
    let err = analyze_log_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to open method log"));
}
