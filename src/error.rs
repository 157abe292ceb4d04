//! Error types for SEG-Y decoding, encoding, and stream I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegyError {
    #[error("unknown {table} field: {name:?}")]
    UnknownField { table: &'static str, name: String },

    #[error("{table} field index {index} out of range (table has {len} fields)")]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unsupported sample format code: {0}")]
    UnsupportedSampleFormat(i32),

    #[error("{field} value {value} does not fit the 16-bit header field (max {max})")]
    ValueOutOfRange {
        field: &'static str,
        value: i64,
        max: u16,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("malformed file: {remainder} trailing bytes do not fill a {stride}-byte trace")]
    MalformedFile { remainder: u64, stride: usize },

    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("sample count mismatch: trace holds {expected} samples, buffer has {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, SegyError>;
