//! Big-endian primitive codec.
//!
//! Every SEG-Y integer and float is stored big-endian. The host byte order is
//! detected once, by inspecting the in-memory layout of a known `u16`, and
//! cached for the life of the process. Conversions copy the raw bytes into a
//! native value and swap them only when the host is little-endian.

use std::sync::OnceLock;

use crate::types::ByteOrder;
use crate::{Result, SegyError};

static HOST_BYTE_ORDER: OnceLock<ByteOrder> = OnceLock::new();

/// Byte order of the running host. Computed on first call, then cached.
pub fn host_byte_order() -> ByteOrder {
    *HOST_BYTE_ORDER.get_or_init(|| {
        let probe: u16 = 0x0102;
        if probe.to_ne_bytes()[0] == 0x02 {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    })
}

fn swap_needed() -> bool {
    host_byte_order() == ByteOrder::Little
}

pub fn read_u16(bytes: &[u8; 2]) -> u16 {
    let x = u16::from_ne_bytes(*bytes);
    if swap_needed() { x.swap_bytes() } else { x }
}

pub fn read_u32(bytes: &[u8; 4]) -> u32 {
    let x = u32::from_ne_bytes(*bytes);
    if swap_needed() { x.swap_bytes() } else { x }
}

pub fn read_u64(bytes: &[u8; 8]) -> u64 {
    let x = u64::from_ne_bytes(*bytes);
    if swap_needed() { x.swap_bytes() } else { x }
}

pub fn read_f32(bytes: &[u8; 4]) -> f32 {
    f32::from_bits(read_u32(bytes))
}

pub fn read_f64(bytes: &[u8; 8]) -> f64 {
    f64::from_bits(read_u64(bytes))
}

pub fn write_u16(out: &mut [u8; 2], value: u16) {
    let x = if swap_needed() { value.swap_bytes() } else { value };
    *out = x.to_ne_bytes();
}

pub fn write_u32(out: &mut [u8; 4], value: u32) {
    let x = if swap_needed() { value.swap_bytes() } else { value };
    *out = x.to_ne_bytes();
}

pub fn write_u64(out: &mut [u8; 8], value: u64) {
    let x = if swap_needed() { value.swap_bytes() } else { value };
    *out = x.to_ne_bytes();
}

pub fn write_f32(out: &mut [u8; 4], value: f32) {
    write_u32(out, value.to_bits());
}

pub fn write_f64(out: &mut [u8; 8], value: f64) {
    write_u64(out, value.to_bits());
}

/// Borrow `N` bytes of `buf` starting at `offset` as a fixed-size array.
pub(crate) fn array_at<const N: usize>(buf: &[u8], offset: usize) -> Result<&[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|s| s.try_into().ok())
        .ok_or(SegyError::BufferTooShort {
            expected: offset.saturating_add(N),
            actual: buf.len(),
        })
}

/// Mutable counterpart of [`array_at`].
pub(crate) fn array_at_mut<const N: usize>(buf: &mut [u8], offset: usize) -> Result<&mut [u8; N]> {
    let actual = buf.len();
    offset
        .checked_add(N)
        .and_then(|end| buf.get_mut(offset..end))
        .and_then(|s| s.try_into().ok())
        .ok_or(SegyError::BufferTooShort {
            expected: offset.saturating_add(N),
            actual,
        })
}
