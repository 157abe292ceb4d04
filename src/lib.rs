//! Pure Rust SEG-Y reader and writer.
//!
//! Zero `unsafe`, zero C dependencies. Reads and writes the textual header
//! (ASCII or EBCDIC), the 400-byte binary header and fixed-length traces with
//! IBM float, int32, int16 or IEEE float samples. Header fields are addressed
//! by their conventional short names (`tracl`, `sx`, `hdt`, ...).
//!
//! # Writing a file
//!
//! ```
//! use std::io::Cursor;
//! use segy_rs::{SampleFormat, SegyConfig, SegyFile, TextEncoding, TraceHeader};
//!
//! // 4 samples at 2 ms, IEEE floats, 2 traces
//! let config = SegyConfig::new(4, 0.002, SampleFormat::IeeeFloat32).with_trace_count(2);
//! let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
//!
//! file.set_text_header("C 1 CLIENT ACME  LINE 7");
//! file.write_text_header(TextEncoding::Ascii).unwrap();
//! file.write_binary_header().unwrap();
//!
//! for (tracl, sx) in [(1, 0), (2, 10)] {
//!     let header = TraceHeader::new()
//!         .with_field("tracl", tracl).unwrap()
//!         .with_field("sx", sx).unwrap();
//!     file.write_trace(&header, &[0.0, 1.0, 0.0, -1.0]).unwrap();
//! }
//!
//! let bytes = file.close().into_inner();
//! assert_eq!(bytes.len(), 3600 + 2 * (240 + 16));
//! ```
//!
//! # Reading a file
//!
//! ```
//! use std::io::Cursor;
//! use segy_rs::{HeaderFields, SampleFormat, SegyConfig, SegyFile, TextEncoding, TraceHeader};
//!
//! # let config = SegyConfig::new(2, 0.004, SampleFormat::IbmFloat32);
//! # let mut out = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
//! # out.write_text_header(TextEncoding::Ascii).unwrap();
//! # out.write_binary_header().unwrap();
//! # out.write_trace(&TraceHeader::new().with_field("cdp", 42).unwrap(), &[0.5, -0.5]).unwrap();
//! # let bytes = out.close().into_inner();
//! let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
//! assert_eq!(file.format(), SampleFormat::IbmFloat32);
//! assert_eq!(file.samples_per_trace(), 2);
//! assert_eq!(file.trace_count(), 1);
//!
//! for trace in file.traces() {
//!     let trace = trace.unwrap();
//!     assert_eq!(trace.header.get("cdp").unwrap(), 42);
//!     assert_eq!(trace.samples, [0.5, -0.5]);
//! }
//! ```
//!
//! # Reaching unregistered bytes
//!
//! ```
//! use segy_rs::raw::{read_value, write_value, RawKind, RawValue};
//!
//! let mut bh = [0u8; 400];
//! write_value(&mut bh, 302, RawValue::Int16(100)).unwrap();
//! assert_eq!(read_value(&bh, 302, RawKind::Int16).unwrap(), RawValue::Int16(100));
//! ```

pub mod bytes;
pub mod ebcdic;
pub mod error;
pub mod fields;
pub mod header;
pub mod ibm;
pub mod raw;
pub mod reader;
pub mod session;
pub mod trace;
pub mod types;

pub use error::{Result, SegyError};
pub use fields::{BINARY_HEADER, FieldSpec, FieldTable, TRACE_HEADER};
pub use header::{BinaryHeader, HeaderFields, TraceHeader};
pub use reader::Traces;
pub use session::{SegyConfig, SegyFile, TraceCount, derive_trace_count};
pub use trace::{Trace, decode_samples, encode_samples};
pub use types::{ByteOrder, SampleFormat, TextEncoding};

pub use ibm::{ibm_to_ieee, ieee_to_ibm};
