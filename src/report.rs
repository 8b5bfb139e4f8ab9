// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Results file serialization.
//!
//! Two lines per candidate: the declaring file path, then the method key
//! indented by four spaces. No header, footer, or separators; downstream
//! consumers pair consecutive non-indented/indented lines.

use crate::aggregator::Candidate;
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize candidates, in the order given, to any writer.
pub fn write_report<W: Write>(out: &mut W, candidates: &[Candidate]) -> Result<()> {
    for candidate in candidates {
        writeln!(out, "{}", candidate.file)?;
        writeln!(out, "    {}", candidate.method)?;
    }
    Ok(())
}

/// Serialize candidates to a results file, truncating any prior contents.
pub fn write_report_file(path: &Path, candidates: &[Candidate]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create results file: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_report(&mut out, candidates)?;
    out.flush()
        .with_context(|| format!("Failed to write results file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_line_records() {
        let candidates = vec![
            Candidate {
                method: "MethodA".to_string(),
                file: "include/foo.hxx".to_string(),
            },
            Candidate {
                method: "MethodB".to_string(),
                file: "toolkit/inc/bar.hxx".to_string(),
            },
        ];
        let mut out = Vec::new();
        write_report(&mut out, &candidates).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "include/foo.hxx\n    MethodA\ntoolkit/inc/bar.hxx\n    MethodB\n"
        );
    }

    #[test]
    fn test_empty_report_is_empty_file() {
        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
