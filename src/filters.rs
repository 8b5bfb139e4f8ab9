// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Path predicates narrowing candidates to cross-linkage-unit declarations.
//!
//! A method only needs manual final-marking when its declaration is visible
//! to separately compiled linkage units, i.e. lives in a shared header. Each
//! rule below is named so it can be tested and tallied on its own; the rules
//! are conjunctive, so their order never changes the outcome.

use crate::aggregator::Candidate;
use regex::Regex;

/// Build-output tree; ephemeral and generated.
const BUILD_OUTPUT_PREFIX: &str = "workdir/";

/// Universal-runtime API headers, out of scope for the final-marking sweep.
const RUNTIME_API_PREFIXES: &[&str] = &[
    "include/com/",
    "include/cppu/",
    "include/cppuhelper/",
    "include/osl/",
    "include/rtl/",
    "include/sal/",
    "include/salhelper/",
    "include/typelib/",
    "include/uno/",
];

/// Why a candidate's declaring file was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Declared inside a compilation unit; the compiler already knows finality.
    CompilationUnitLocal,
    /// Test code.
    TestCode,
    /// Generated file under the build-output tree.
    BuildOutput,
    /// Not a header shared between linkage units.
    NotSharedHeader,
    /// Universal-runtime API header.
    RuntimeApi,
}

/// Per-rule tallies for the run summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExclusionCounts {
    pub compilation_unit_local: usize,
    pub test_code: usize,
    pub build_output: usize,
    pub not_shared_header: usize,
    pub runtime_api: usize,
}

impl ExclusionCounts {
    pub fn bump(&mut self, reason: Exclusion) {
        match reason {
            Exclusion::CompilationUnitLocal => self.compilation_unit_local += 1,
            Exclusion::TestCode => self.test_code += 1,
            Exclusion::BuildOutput => self.build_output += 1,
            Exclusion::NotSharedHeader => self.not_shared_header += 1,
            Exclusion::RuntimeApi => self.runtime_api += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.compilation_unit_local
            + self.test_code
            + self.build_output
            + self.not_shared_header
            + self.runtime_api
    }
}

/// The filter chain, with the module-header patterns compiled once.
pub struct PathFilter {
    module_inc_direct: Regex,
    module_inc_nested: Regex,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFilter {
    pub fn new() -> Self {
        PathFilter {
            module_inc_direct: Regex::new(r"^\w+/inc/").unwrap(),
            module_inc_nested: Regex::new(r"^\w+/.*/inc/").unwrap(),
        }
    }

    /// First rule the file fails, or `None` if it is an interesting
    /// cross-linkage-unit declaration.
    pub fn exclusion_for(&self, file: &str) -> Option<Exclusion> {
        if is_compilation_unit_local(file) {
            return Some(Exclusion::CompilationUnitLocal);
        }
        if is_test_code(file) {
            return Some(Exclusion::TestCode);
        }
        if is_build_output(file) {
            return Some(Exclusion::BuildOutput);
        }
        if !self.is_shared_header(file) {
            return Some(Exclusion::NotSharedHeader);
        }
        if is_runtime_api(file) {
            return Some(Exclusion::RuntimeApi);
        }
        None
    }

    /// True when the declaring file survives every rule.
    pub fn is_interesting(&self, file: &str) -> bool {
        self.exclusion_for(file).is_none()
    }

    /// Shared headers: the top-level `include/` tree, or a module's `inc/`
    /// tree (`<module>/inc/...` or `<module>/.../inc/...`).
    fn is_shared_header(&self, file: &str) -> bool {
        file.starts_with("include/")
            || self.module_inc_direct.is_match(file)
            || self.module_inc_nested.is_match(file)
    }

    /// Drop the candidates whose declaring file fails a rule, tallying the
    /// first failed rule of each dropped candidate.
    pub fn apply(&self, candidates: Vec<Candidate>) -> (Vec<Candidate>, ExclusionCounts) {
        let mut counts = ExclusionCounts::default();
        let mut kept = Vec::new();
        for candidate in candidates {
            match self.exclusion_for(&candidate.file) {
                Some(reason) => counts.bump(reason),
                None => kept.push(candidate),
            }
        }
        (kept, counts)
    }
}

fn is_compilation_unit_local(file: &str) -> bool {
    file.contains(".cxx")
}

fn is_test_code(file: &str) -> bool {
    file.contains("/qa/")
}

fn is_build_output(file: &str) -> bool {
    file.starts_with(BUILD_OUTPUT_PREFIX)
}

fn is_runtime_api(file: &str) -> bool {
    RUNTIME_API_PREFIXES.iter().any(|p| file.starts_with(p))
}
