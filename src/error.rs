use std::io;
use thiserror::Error;

/// Decoding failures.
///
/// Every variant is terminal for the current file: no retries, no partial
/// recovery. The name-table heuristic is not represented here — when it
/// misfires the result is wrong data, not a caught error.
#[derive(Error, Debug)]
pub enum MmfwError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a recognised MMFW or Vector file")]
    UnrecognizedFormat,

    #[error("file contains no resources")]
    NoResources,

    #[error("corrupt resource table: {0}")]
    CorruptTable(String),

    #[error("refusing to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: u64 },
}
