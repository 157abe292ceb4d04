//! Header marshalling between packed big-endian blocks and `i32` field arrays.
//!
//! [`pack`] and [`unpack`] lay out the first `nk` fields of a [`FieldTable`]
//! contiguously, in table order, with no padding. Two-byte fields are
//! sign-extended on the way in and truncated to their low 16 bits on the way
//! out. [`BinaryHeader`] and [`TraceHeader`] wrap the full-width arrays and
//! add lookup by field name.

use std::fmt;

use crate::bytes::{array_at, array_at_mut, read_u16, read_u32, write_u16, write_u32};
use crate::fields::{
    BINARY_HEADER, BINARY_HEADER_BYTES, BINARY_HEADER_KEYS, FieldTable, TRACE_HEADER,
    TRACE_HEADER_KEYS, trace_keys,
};
use crate::{Result, SegyError};

/// Byte offset of the sample interval (µs) in the binary header.
pub const BH_DT_OFFSET: usize = 16;
/// Byte offset of the samples-per-trace count in the binary header.
pub const BH_NS_OFFSET: usize = 20;
/// Byte offset of the sample format code in the binary header.
pub const BH_FORMAT_OFFSET: usize = 24;

fn check_field_count(table: &FieldTable, nk: usize) -> Result<()> {
    if nk > table.len() {
        return Err(SegyError::IndexOutOfRange {
            table: table.label(),
            index: nk - 1,
            len: table.len(),
        });
    }
    Ok(())
}

fn check_buffer(table: &FieldTable, nk: usize, len: usize) -> Result<()> {
    let needed = table.packed_len(nk);
    if len < needed {
        return Err(SegyError::BufferTooShort {
            expected: needed,
            actual: len,
        });
    }
    Ok(())
}

/// Pack `values` into `out` using the first `values.len()` fields of `table`.
///
/// Bytes past the packed fields are left untouched.
pub fn pack(table: &FieldTable, values: &[i32], out: &mut [u8]) -> Result<()> {
    check_field_count(table, values.len())?;
    check_buffer(table, values.len(), out.len())?;

    let mut offset = 0;
    for (spec, &value) in table.fields().iter().zip(values) {
        if spec.width == 2 {
            write_u16(array_at_mut(out, offset)?, value as u16);
        } else {
            write_u32(array_at_mut(out, offset)?, value as u32);
        }
        offset += spec.width;
    }
    Ok(())
}

/// Unpack the first `values.len()` fields of `table` from `input`.
pub fn unpack_into(table: &FieldTable, input: &[u8], values: &mut [i32]) -> Result<()> {
    check_field_count(table, values.len())?;
    check_buffer(table, values.len(), input.len())?;

    let mut offset = 0;
    for (spec, slot) in table.fields().iter().zip(values.iter_mut()) {
        *slot = if spec.width == 2 {
            read_u16(array_at(input, offset)?) as i16 as i32
        } else {
            read_u32(array_at(input, offset)?) as i32
        };
        offset += spec.width;
    }
    Ok(())
}

/// Unpack the first `nk` fields of `table` from `input` into a new vector.
pub fn unpack(table: &FieldTable, input: &[u8], nk: usize) -> Result<Vec<i32>> {
    check_field_count(table, nk)?;
    let mut values = vec![0; nk];
    unpack_into(table, input, &mut values)?;
    Ok(values)
}

/// A full-width header field array tied to its registry.
pub trait HeaderFields {
    /// The registry describing this header's layout.
    fn table() -> &'static FieldTable;

    fn values(&self) -> &[i32];

    fn values_mut(&mut self) -> &mut [i32];

    /// Value of the field called `name`.
    fn get(&self, name: &str) -> Result<i32> {
        let index = Self::table().index_of(name)?;
        Ok(self.values()[index])
    }

    /// Set the field called `name`.
    fn set(&mut self, name: &str, value: i32) -> Result<()> {
        let index = Self::table().index_of(name)?;
        self.values_mut()[index] = value;
        Ok(())
    }

    /// Pack every field into `out`.
    fn pack_into(&self, out: &mut [u8]) -> Result<()> {
        pack(Self::table(), self.values(), out)
    }

    /// Replace every field with the values unpacked from `input`.
    fn unpack_from(&mut self, input: &[u8]) -> Result<()> {
        unpack_into(Self::table(), input, self.values_mut())
    }
}

/// The 27 binary header fields as working integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHeader {
    values: [i32; BINARY_HEADER_KEYS],
}

impl BinaryHeader {
    pub fn new() -> Self {
        Self {
            values: [0; BINARY_HEADER_KEYS],
        }
    }

    pub fn from_values(values: [i32; BINARY_HEADER_KEYS]) -> Self {
        Self { values }
    }

    /// Set a field by name, builder style.
    pub fn with_field(mut self, name: &str, value: i32) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }
}

impl Default for BinaryHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFields for BinaryHeader {
    fn table() -> &'static FieldTable {
        &BINARY_HEADER
    }

    fn values(&self) -> &[i32] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }
}

/// The 91 trace header fields as working integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceHeader {
    values: [i32; TRACE_HEADER_KEYS],
}

impl TraceHeader {
    pub fn new() -> Self {
        Self {
            values: [0; TRACE_HEADER_KEYS],
        }
    }

    pub fn from_values(values: [i32; TRACE_HEADER_KEYS]) -> Self {
        Self { values }
    }

    /// Set a field by name, builder style.
    pub fn with_field(mut self, name: &str, value: i32) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Multiplier implied by `scalco` for the coordinate fields.
    ///
    /// Zero means no scaling, a positive value multiplies, and a negative
    /// value divides.
    pub fn coordinate_scale(&self) -> f64 {
        match self.values[trace_keys::SCALCO] {
            0 => 1.0,
            s if s < 0 => -1.0 / s as f64,
            s => s as f64,
        }
    }
}

impl Default for TraceHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFields for TraceHeader {
    fn table() -> &'static FieldTable {
        &TRACE_HEADER
    }

    fn values(&self) -> &[i32] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }
}

impl fmt::Display for TraceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trace {} | fldr {} | cdp {} | sx {} | gx {} | {} samples @ {} µs",
            self.values[trace_keys::TRACL],
            self.values[trace_keys::FLDR],
            self.values[trace_keys::CDP],
            self.values[trace_keys::SX],
            self.values[trace_keys::GX],
            self.values[trace_keys::NS],
            self.values[trace_keys::DT],
        )
    }
}

// Shortcuts on a raw binary header block. Counts and intervals are unsigned
// 16-bit values on disk.

/// Sample format code stored at byte 24.
pub fn format_code(raw: &[u8; BINARY_HEADER_BYTES]) -> u16 {
    read_u16(&[raw[BH_FORMAT_OFFSET], raw[BH_FORMAT_OFFSET + 1]])
}

pub fn set_format_code(raw: &mut [u8; BINARY_HEADER_BYTES], code: u16) {
    put_u16_at(raw, BH_FORMAT_OFFSET, code);
}

/// Samples per trace stored at byte 20.
pub fn sample_count(raw: &[u8; BINARY_HEADER_BYTES]) -> u16 {
    read_u16(&[raw[BH_NS_OFFSET], raw[BH_NS_OFFSET + 1]])
}

pub fn set_sample_count(raw: &mut [u8; BINARY_HEADER_BYTES], ns: u16) {
    put_u16_at(raw, BH_NS_OFFSET, ns);
}

/// Sample interval in seconds, from the microsecond field at byte 16.
pub fn sample_interval(raw: &[u8; BINARY_HEADER_BYTES]) -> f32 {
    let micros = read_u16(&[raw[BH_DT_OFFSET], raw[BH_DT_OFFSET + 1]]);
    micros as f32 / 1_000_000.0
}

/// Store a sample interval given in seconds, rounded to whole microseconds.
///
/// Fails with [`SegyError::ValueOutOfRange`] if the interval is negative or
/// longer than 65535 µs; the block is left untouched.
pub fn set_sample_interval(raw: &mut [u8; BINARY_HEADER_BYTES], dt: f32) -> Result<()> {
    let micros = interval_field(f64::from(dt) * 1e6)?;
    put_u16_at(raw, BH_DT_OFFSET, micros);
    Ok(())
}

/// Check a sample count against the 16-bit `hns` field.
pub fn sample_count_field(ns: usize) -> Result<u16> {
    u16::try_from(ns).map_err(|_| SegyError::ValueOutOfRange {
        field: "hns",
        value: i64::try_from(ns).unwrap_or(i64::MAX),
        max: u16::MAX,
    })
}

/// Round a microsecond interval and check it against the 16-bit `hdt` field.
pub fn interval_field(micros: f64) -> Result<u16> {
    let micros = micros.round();
    if (0.0..=f64::from(u16::MAX)).contains(&micros) {
        Ok(micros as u16)
    } else {
        Err(SegyError::ValueOutOfRange {
            field: "hdt",
            // NaN has no integer value; report it as the lowest one
            value: if micros.is_nan() { i64::MIN } else { micros as i64 },
            max: u16::MAX,
        })
    }
}

fn put_u16_at(raw: &mut [u8; BINARY_HEADER_BYTES], offset: usize, value: u16) {
    let mut bytes = [0u8; 2];
    write_u16(&mut bytes, value);
    raw[offset] = bytes[0];
    raw[offset + 1] = bytes[1];
}
