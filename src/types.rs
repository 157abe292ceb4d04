//! Shared types: [`SampleFormat`], [`TextEncoding`], and [`ByteOrder`].

use std::fmt;

use crate::{Result, SegyError};

/// Byte order of the host or of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Character encoding of the 3200-byte textual header on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Stored as-is.
    #[default]
    Ascii,
    /// Transcoded through the EBCDIC tables on read and write.
    Ebcdic,
}

/// Sample encoding of the trace payload (binary header `format` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// 32-bit IBM hexadecimal float (code 1).
    IbmFloat32,
    /// 32-bit two's complement integer (code 2).
    Int32,
    /// 16-bit two's complement integer (code 3).
    Int16,
    /// 32-bit IEEE float (code 5).
    IeeeFloat32,
}

impl SampleFormat {
    /// Convert a raw format code from the binary header to a `SampleFormat`.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::IbmFloat32),
            2 => Ok(Self::Int32),
            3 => Ok(Self::Int16),
            5 => Ok(Self::IeeeFloat32),
            _ => Err(SegyError::UnsupportedSampleFormat(code)),
        }
    }

    /// Convert to the raw format code stored in the binary header.
    pub fn to_code(self) -> i32 {
        match self {
            Self::IbmFloat32 => 1,
            Self::Int32 => 2,
            Self::Int16 => 3,
            Self::IeeeFloat32 => 5,
        }
    }

    /// Bytes per encoded sample: 2 for [`SampleFormat::Int16`], 4 otherwise.
    pub fn sample_width(self) -> usize {
        match self {
            Self::Int16 => 2,
            _ => 4,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IbmFloat32 => write!(f, "IBM32"),
            Self::Int32 => write!(f, "INT32"),
            Self::Int16 => write!(f, "INT16"),
            Self::IeeeFloat32 => write!(f, "IEEE32"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_codes() {
        for code in [1, 2, 3, 5] {
            let format = SampleFormat::from_code(code).unwrap();
            assert_eq!(format.to_code(), code);
        }
    }

    #[test]
    fn test_unsupported_format_codes() {
        for code in [0, 4, 6, 8, -1] {
            assert!(matches!(
                SampleFormat::from_code(code),
                Err(SegyError::UnsupportedSampleFormat(c)) if c == code
            ));
        }
    }

    #[test]
    fn test_sample_width() {
        assert_eq!(SampleFormat::Int16.sample_width(), 2);
        assert_eq!(SampleFormat::Int32.sample_width(), 4);
        assert_eq!(SampleFormat::IbmFloat32.sample_width(), 4);
        assert_eq!(SampleFormat::IeeeFloat32.sample_width(), 4);
    }
}
