// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the bounded log.

/// Errors raised by [`BoundedLog`](crate::BoundedLog) operations.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file could not be opened or created.
    #[error("cannot open log file '{path}': {source}")]
    Open {
        /// Log file path.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Appending a record failed.
    #[error("cannot append to log file '{path}': {source}")]
    Write {
        /// Log file path.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Rewriting the file after hitting the size cap failed.
    #[error("cannot reset log file '{path}': {source}")]
    Reset {
        /// Log file path.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}
