// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Accumulators for the single pass over the override-tracking log.
//!
//! Three containers: the set of defined method keys, the set of overridden
//! method keys, and the method-to-declaring-file map. Duplicate definitions
//! of the same key are last-write-wins on the file attribution.

use crate::log_reader::LogLine;
use std::collections::{HashMap, HashSet};

/// A (method key, declaring file) pair; emitted to the report if it
/// survives the path rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub method: String,
    pub file: String,
}

/// Owned accumulator state for one run.
#[derive(Debug, Default)]
pub struct Aggregator {
    definitions: HashSet<String>,
    overrides: HashSet<String>,
    file_of: HashMap<String, String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `definition:` line. A repeated key keeps the latest file.
    pub fn record_definition(&mut self, method: &str, file: &str) {
        self.definitions.insert(method.to_string());
        self.file_of.insert(method.to_string(), file.to_string());
    }

    /// Record an `overridden:` line.
    pub fn record_override(&mut self, method: &str) {
        self.overrides.insert(method.to_string());
    }

    /// Feed one classified line into the accumulators.
    ///
    /// `Ignored` and `Malformed` lines are no-ops here; the caller decides
    /// how to report malformed input.
    pub fn record(&mut self, line: &LogLine) {
        match line {
            LogLine::Definition { method, file } => self.record_definition(method, file),
            LogLine::Overridden { method } => self.record_override(method),
            LogLine::Ignored | LogLine::Malformed => {}
        }
    }

    /// Number of distinct method keys with a definition record.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Number of distinct method keys with an override record.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// The set difference: every defined method key with no override record,
    /// resolved to its (last recorded) declaring file. Unordered.
    pub fn never_overridden(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for method in &self.definitions {
            if self.overrides.contains(method) {
                continue;
            }
            if let Some(file) = self.file_of.get(method) {
                candidates.push(Candidate {
                    method: method.clone(),
                    file: file.clone(),
                });
            }
        }
        candidates
    }
}
