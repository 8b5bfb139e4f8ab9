// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Per-run log files for finality tools.
//!
//! Each run writes logs/<tool-name>/<YYYY-MM-DD>/run-<HH-MM-SS>.log. If the
//! log file cannot be created the tool keeps running without one.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log sink for one tool run; messages go to stdout and the run log.
pub struct RunLog {
    file: Option<fs::File>,
    path: Option<PathBuf>,
    started: DateTime<Local>,
}

impl RunLog {
    pub fn new(tool_name: &str) -> Self {
        let started = Local::now();
        let (file, path) = match Self::create_log_file(tool_name, &started) {
            Ok((file, path)) => (Some(file), Some(path)),
            Err(e) => {
                eprintln!("Warning: could not create run log: {e}");
                (None, None)
            }
        };
        RunLog { file, path, started }
    }

    fn create_log_file(tool_name: &str, started: &DateTime<Local>) -> Result<(fs::File, PathBuf)> {
        let dir = PathBuf::from("logs")
            .join(tool_name)
            .join(started.format("%Y-%m-%d").to_string());
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("run-{}.log", started.format("%H-%M-%S")));
        let file = fs::File::create(&path)?;
        Ok((file, path))
    }

    /// Print a message and append it to the run log.
    pub fn log(&mut self, message: &str) {
        println!("{message}");
        if let Some(ref mut file) = self.file {
            let _ = writeln!(file, "{message}");
        }
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close out the run with a summary and timing lines.
    pub fn finalize(&mut self, summary: &str) {
        let ended = Local::now();
        let duration = ended.signed_duration_since(self.started);
        self.log("");
        self.log("=== Run Summary ===");
        self.log(summary);
        self.log(&format!("Started: {}", self.started.format("%Y-%m-%d %H:%M:%S")));
        self.log(&format!("Ended: {}", ended.format("%Y-%m-%d %H:%M:%S")));
        self.log(&format!("Duration: {}ms", duration.num_milliseconds()));
        if let Some(ref path) = self.path {
            self.log(&format!("Log saved to: {}", path.display()));
        }
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        if let Some(ref mut file) = self.file {
            let _ = file.flush();
        }
    }
}
