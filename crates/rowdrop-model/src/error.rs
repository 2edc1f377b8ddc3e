#![forbid(unsafe_code)]

//! Model error types.

use core::fmt;

/// Errors produced by collection mutation primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Indices or counts that do not describe a valid range for the
    /// requested operation against the current collection length.
    InvalidRange {
        /// Mutation that rejected the range (`"insert"`, `"remove"`, `"set"`).
        op: &'static str,
        /// Starting index passed by the caller.
        at: usize,
        /// Row count passed by the caller (1 for `set`).
        count: usize,
        /// Collection length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { op, at, count, len } => {
                write!(
                    f,
                    "invalid range for {op}: at={at} count={count} over {len} rows"
                )
            }
        }
    }
}

impl std::error::Error for ModelError {}
