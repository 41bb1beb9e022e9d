// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Append-only log file with a truncate-and-keep-latest size bound.

use std::fs::OpenOptions;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use crate::LogError;

/// Default size cap in bytes.
pub const DEFAULT_CAP_BYTES: u64 = 10_000;

/// A line-oriented log file with a soft byte cap.
///
/// Every append writes one record and then checks the resulting file size.
/// While the size stays at or below the cap nothing else happens; once an
/// append pushes it past the cap, the file is rewritten to contain only
/// that newest record. The file can therefore exceed the cap by at most
/// one record, briefly.
///
/// The file is reopened for each append. The daemon writes one line every
/// few seconds, so holding a descriptor between cycles buys nothing, and
/// reopening means a rotated or deleted file heals on the next cycle.
#[derive(Debug, Clone)]
pub struct BoundedLog {
    path: PathBuf,
    cap_bytes: u64,
}

impl BoundedLog {
    /// Creates a log bound to `path` with the default cap.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_cap(path, DEFAULT_CAP_BYTES)
    }

    /// Creates a log with an explicit byte cap.
    pub fn with_cap(path: impl Into<PathBuf>, cap_bytes: u64) -> Self {
        Self {
            path: path.into(),
            cap_bytes,
        }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The size cap in bytes.
    pub fn cap_bytes(&self) -> u64 {
        self.cap_bytes
    }

    /// Appends one record line, then enforces the cap.
    ///
    /// `line` must not include the terminator; one is added. The file is
    /// created on first use. Returns `true` when the append pushed the file
    /// over the cap and it was reset to the single newest record.
    pub fn append(&mut self, line: &str) -> Result<bool, LogError> {
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LogError::Open {
                path: self.path.display().to_string(),
                source: e,
            })?;

        file.write_all(record.as_bytes()).map_err(|e| LogError::Write {
            path: self.path.display().to_string(),
            source: e,
        })?;

        // In append mode the cursor lands at end-of-file after the write,
        // so the position doubles as the file size.
        let size = file.stream_position().map_err(|e| LogError::Write {
            path: self.path.display().to_string(),
            source: e,
        })?;
        drop(file);

        if size <= self.cap_bytes {
            return Ok(false);
        }

        tracing::info!(
            "log reached {size} bytes (cap {}), keeping only the newest record",
            self.cap_bytes
        );
        std::fs::write(&self.path, record).map_err(|e| LogError::Reset {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(true)
    }
}
