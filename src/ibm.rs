//! IBM System/360 hexadecimal floating point <-> IEEE-754 single precision.
//!
//! An IBM single is `sign(1) | exponent(7, excess 64, base 16) | fraction(24)`
//! with value `0.fraction * 16^(exponent - 64)`. The conversions below work on
//! the raw bits and are bit-exact with the classic SEG-Y tooling, including
//! truncation of low fraction bits, flush-to-zero on underflow, and
//! saturation on overflow.

use crate::bytes::{read_u32, write_u32};

/// Largest IBM magnitude, returned when an IEEE value overflows the IBM range.
pub const IBM_MAX: u32 = 0x7FFF_FFFF;
/// Largest finite IEEE magnitude, returned when an IBM value overflows `f32`.
pub const IEEE_MAX: u32 = 0x7F7F_FFFF;

/// Decode 4 big-endian IBM float bytes into an `f32`.
///
/// IBM values beyond `f32::MAX` saturate to `±f32::MAX`; values below the
/// smallest normal `f32` flush to a signed zero.
pub fn ibm_to_ieee(bytes: &[u8; 4]) -> f32 {
    let x = read_u32(bytes);

    if x & 0x7FFF_FFFF == 0 {
        return 0.0;
    }

    let mut s = x & 0x8000_0000;
    let mut e = ((x & 0x7F00_0000) >> 24) as i32 - 64;
    let mut f = x & 0x00FF_FFFF;

    // base-16 exponent to base-2
    e <<= 2;
    // 24-bit fraction to 23-bit mantissa
    e -= 1;

    if f != 0 {
        while f & 0x0080_0000 == 0 {
            f <<= 1;
            e -= 1;
        }
    }

    // drop the implicit leading 1
    f &= 0x007F_FFFF;

    e += 127;
    if e >= 255 {
        s |= IEEE_MAX;
    } else if e > 0 {
        s |= ((e as u32) << 23) | f;
    }

    f32::from_bits(s)
}

/// Encode an `f32` as 4 big-endian IBM float bytes.
///
/// Low mantissa bits that do not fit the hex-normalized fraction are
/// truncated. Magnitudes too small for IBM become a signed zero.
pub fn ieee_to_ibm(value: f32) -> [u8; 4] {
    let x = value.to_bits();
    let mut out = [0u8; 4];

    if x & 0x7FFF_FFFF == 0 {
        write_u32(&mut out, x);
        return out;
    }

    let mut s = x & 0x8000_0000;
    let mut e = ((x & 0x7F80_0000) >> 23) as i32 - 127;
    let mut f = x & 0x007F_FFFF;

    // 23-bit mantissa to 24-bit fraction, restoring the implicit 1
    f <<= 1;
    f |= 0x0100_0000;

    // base-2 exponent to base-16
    if e >= 0 {
        f <<= e & 3;
        e >>= 2;
    } else {
        f >>= (-e) & 3;
        e = -((-e) >> 2);
    }

    if f & 0x0F00_0000 != 0 {
        f >>= 4;
        e += 1;
    }

    e += 64;
    if e > 127 {
        s |= IBM_MAX;
    } else if e >= 0 {
        s |= ((e as u32) << 24) | f;
    }

    write_u32(&mut out, s);
    out
}
