//! Trace sample codec and the decoded [`Trace`] type.
//!
//! Samples are always `f32` in memory. On disk they are encoded according to
//! the file's [`SampleFormat`]:
//!
//! | code | format        | width | encode            | decode           |
//! |------|---------------|-------|-------------------|------------------|
//! | 1    | IBM float     | 4     | [`ieee_to_ibm`]   | [`ibm_to_ieee`]  |
//! | 2    | int32         | 4     | truncate to `i32` | `i32 as f32`     |
//! | 3    | int16         | 2     | truncate to `i16` | `i16 as f32`     |
//! | 5    | IEEE float    | 4     | bit copy          | bit copy         |
//!
//! Integer formats are lossy: the fractional part is dropped toward zero and
//! an int16 sample keeps only the low 16 bits of the truncated value.

use std::fmt;

use crate::bytes::{
    array_at, array_at_mut, read_f32, read_u16, read_u32, write_f32, write_u16, write_u32,
};
use crate::header::TraceHeader;
use crate::ibm::{ibm_to_ieee, ieee_to_ibm};
use crate::types::SampleFormat;
use crate::{Result, SegyError};

/// One decoded trace: its header and its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    pub samples: Vec<f32>,
}

impl Trace {
    pub fn new(header: TraceHeader, samples: Vec<f32>) -> Self {
        Self { header, samples }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} decoded", self.header, self.samples.len())
    }
}

/// Bytes needed to hold `ns` samples in `format`.
pub fn payload_len(ns: usize, format: SampleFormat) -> usize {
    ns * format.sample_width()
}

fn check_payload(ns: usize, format: SampleFormat, len: usize) -> Result<()> {
    let needed = payload_len(ns, format);
    if len < needed {
        return Err(SegyError::BufferTooShort {
            expected: needed,
            actual: len,
        });
    }
    Ok(())
}

/// Decode `out.len()` samples from `buf`.
pub fn decode_samples_into(buf: &[u8], format: SampleFormat, out: &mut [f32]) -> Result<()> {
    check_payload(out.len(), format, buf.len())?;

    match format {
        SampleFormat::IbmFloat32 => {
            for (i, s) in out.iter_mut().enumerate() {
                *s = ibm_to_ieee(array_at(buf, i * 4)?);
            }
        }
        SampleFormat::Int32 => {
            for (i, s) in out.iter_mut().enumerate() {
                *s = read_u32(array_at(buf, i * 4)?) as i32 as f32;
            }
        }
        SampleFormat::Int16 => {
            for (i, s) in out.iter_mut().enumerate() {
                *s = read_u16(array_at(buf, i * 2)?) as i16 as f32;
            }
        }
        SampleFormat::IeeeFloat32 => {
            for (i, s) in out.iter_mut().enumerate() {
                *s = read_f32(array_at(buf, i * 4)?);
            }
        }
    }
    Ok(())
}

/// Decode `ns` samples from `buf` into a new vector.
pub fn decode_samples(buf: &[u8], ns: usize, format: SampleFormat) -> Result<Vec<f32>> {
    let mut out = vec![0.0; ns];
    decode_samples_into(buf, format, &mut out)?;
    Ok(out)
}

/// Encode every sample of `samples` into the front of `out`.
pub fn encode_samples_into(samples: &[f32], format: SampleFormat, out: &mut [u8]) -> Result<()> {
    check_payload(samples.len(), format, out.len())?;

    match format {
        SampleFormat::IbmFloat32 => {
            for (i, &s) in samples.iter().enumerate() {
                *array_at_mut::<4>(out, i * 4)? = ieee_to_ibm(s);
            }
        }
        SampleFormat::Int32 => {
            for (i, &s) in samples.iter().enumerate() {
                write_u32(array_at_mut(out, i * 4)?, s as i32 as u32);
            }
        }
        SampleFormat::Int16 => {
            for (i, &s) in samples.iter().enumerate() {
                write_u16(array_at_mut(out, i * 2)?, s as i32 as u16);
            }
        }
        SampleFormat::IeeeFloat32 => {
            for (i, &s) in samples.iter().enumerate() {
                write_f32(array_at_mut(out, i * 4)?, s);
            }
        }
    }
    Ok(())
}

/// Encode `samples` into a new byte vector.
pub fn encode_samples(samples: &[f32], format: SampleFormat) -> Result<Vec<u8>> {
    let mut out = vec![0u8; payload_len(samples.len(), format)];
    encode_samples_into(samples, format, &mut out)?;
    Ok(out)
}
