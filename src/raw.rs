//! Unchecked-offset typed access to raw header buffers.
//!
//! This is the escape hatch for fields that are not in the registries, e.g. a
//! vendor-specific value at byte 302 of the binary header. Offsets are taken
//! as given: nothing checks that they line up with a registry field or that
//! the value does not overlap one. The only validation is that
//! `offset + width` fits inside the buffer, which fails with
//! [`SegyError::BufferTooShort`].
//!
//! Prefer [`HeaderFields::get`](crate::header::HeaderFields::get) and
//! [`HeaderFields::set`](crate::header::HeaderFields::set) for named fields.
//! Values are big-endian like everything else on disk.

use crate::bytes::{
    array_at, array_at_mut, read_f32, read_f64, read_u16, read_u32, read_u64, write_f32,
    write_f64, write_u16, write_u32, write_u64,
};
use crate::{Result, SegyError};

/// Type of a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Byte,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl RawKind {
    /// Parse a one-letter type tag: `c`, `s`, `i`, `l`, `f`, `d`.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'c' => Some(Self::Byte),
            's' => Some(Self::Int16),
            'i' => Some(Self::Int32),
            'l' => Some(Self::Int64),
            'f' => Some(Self::Float32),
            'd' => Some(Self::Float64),
            _ => None,
        }
    }

    pub fn width(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Int16 => 2,
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 => 8,
        }
    }
}

/// A typed value read from, or to be written to, a raw offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl RawValue {
    pub fn kind(&self) -> RawKind {
        match self {
            Self::Byte(_) => RawKind::Byte,
            Self::Int16(_) => RawKind::Int16,
            Self::Int32(_) => RawKind::Int32,
            Self::Int64(_) => RawKind::Int64,
            Self::Float32(_) => RawKind::Float32,
            Self::Float64(_) => RawKind::Float64,
        }
    }
}

/// Read a `kind` value at byte `offset` of `buf`.
pub fn read_value(buf: &[u8], offset: usize, kind: RawKind) -> Result<RawValue> {
    let value = match kind {
        RawKind::Byte => {
            let b = buf.get(offset).ok_or(SegyError::BufferTooShort {
                expected: offset.saturating_add(1),
                actual: buf.len(),
            })?;
            RawValue::Byte(*b)
        }
        RawKind::Int16 => RawValue::Int16(read_u16(array_at(buf, offset)?) as i16),
        RawKind::Int32 => RawValue::Int32(read_u32(array_at(buf, offset)?) as i32),
        RawKind::Int64 => RawValue::Int64(read_u64(array_at(buf, offset)?) as i64),
        RawKind::Float32 => RawValue::Float32(read_f32(array_at(buf, offset)?)),
        RawKind::Float64 => RawValue::Float64(read_f64(array_at(buf, offset)?)),
    };
    Ok(value)
}

/// Write `value` at byte `offset` of `buf`.
pub fn write_value(buf: &mut [u8], offset: usize, value: RawValue) -> Result<()> {
    match value {
        RawValue::Byte(v) => {
            let actual = buf.len();
            let slot = buf.get_mut(offset).ok_or(SegyError::BufferTooShort {
                expected: offset.saturating_add(1),
                actual,
            })?;
            *slot = v;
        }
        RawValue::Int16(v) => write_u16(array_at_mut(buf, offset)?, v as u16),
        RawValue::Int32(v) => write_u32(array_at_mut(buf, offset)?, v as u32),
        RawValue::Int64(v) => write_u64(array_at_mut(buf, offset)?, v as u64),
        RawValue::Float32(v) => write_f32(array_at_mut(buf, offset)?, v),
        RawValue::Float64(v) => write_f64(array_at_mut(buf, offset)?, v),
    }
    Ok(())
}
