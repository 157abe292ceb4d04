//! Streaming SEG-Y session over a caller-supplied stream.
//!
//! A [`SegyFile`] sequences the three block types of a SEG-Y file against a
//! stream:
//!
//! ```text
//! [0    .. 3200)  textual header
//! [3200 .. 3600)  binary header
//! [3600 .. EOF)   traces, each 240-byte header + ns * width sample bytes
//! ```
//!
//! A session opened with [`SegyFile::open_read`] has already consumed both
//! headers and sits at the first trace. A session opened with
//! [`SegyFile::open_write`] writes nothing until the caller asks; the usual
//! order is textual header, binary header, then traces.
//!
//! Traces are read and written strictly in stream order through one scratch
//! buffer owned by the session. The session never closes the stream;
//! [`SegyFile::close`] hands it back.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tracing::{debug, warn};

use crate::fields::{BINARY_HEADER_BYTES, TEXT_HEADER_BYTES, TRACE_HEADER_BYTES, binary_keys};
use crate::header::{self, BinaryHeader, HeaderFields, TraceHeader};
use crate::reader::Traces;
use crate::trace::{self, Trace};
use crate::types::{SampleFormat, TextEncoding};
use crate::{Result, SegyError, ebcdic};

/// Byte offset of the first trace.
pub const FIRST_TRACE_OFFSET: u64 = (TEXT_HEADER_BYTES + BINARY_HEADER_BYTES) as u64;

/// Parameters for a write session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegyConfig {
    /// Samples per trace (`ns`).
    pub samples_per_trace: usize,
    /// Sample interval in seconds, or in milliseconds when greater than 1.
    pub sample_interval: f32,
    pub format: SampleFormat,
    /// Number of traces the caller intends to write.
    pub trace_count: usize,
}

impl SegyConfig {
    pub fn new(samples_per_trace: usize, sample_interval: f32, format: SampleFormat) -> Self {
        Self {
            samples_per_trace,
            sample_interval,
            format,
            trace_count: 0,
        }
    }

    pub fn with_trace_count(mut self, trace_count: usize) -> Self {
        self.trace_count = trace_count;
        self
    }

    pub fn with_samples_per_trace(mut self, ns: usize) -> Self {
        self.samples_per_trace = ns;
        self
    }

    pub fn with_sample_interval(mut self, dt: f32) -> Self {
        self.sample_interval = dt;
        self
    }

    pub fn with_format(mut self, format: SampleFormat) -> Self {
        self.format = format;
        self
    }

    /// Sample interval in whole microseconds, as stored in `hdt`.
    ///
    /// Fails with [`SegyError::ValueOutOfRange`] if the interval does not fit
    /// the 16-bit field.
    pub fn interval_micros(&self) -> Result<u16> {
        let dt = f64::from(self.sample_interval);
        header::interval_field(if dt > 1.0 { dt * 1e3 } else { dt * 1e6 })
    }
}

/// Result of dividing the trace area of a stream into whole traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceCount {
    /// Whole traces that fit.
    pub count: usize,
    /// Bytes left over after the last whole trace.
    pub remainder: u64,
}

impl TraceCount {
    pub fn is_exact(&self) -> bool {
        self.remainder == 0
    }

    /// The count, or [`SegyError::MalformedFile`] if bytes were left over.
    pub fn exact(self, stride: usize) -> Result<usize> {
        if self.is_exact() {
            Ok(self.count)
        } else {
            Err(SegyError::MalformedFile {
                remainder: self.remainder,
                stride,
            })
        }
    }
}

/// Count whole traces of `stride` bytes in a stream of `stream_len` bytes.
///
/// Division truncates: a partial trailing trace is reported in
/// [`TraceCount::remainder`] and is not counted.
pub fn derive_trace_count(stream_len: u64, stride: usize) -> TraceCount {
    let data = stream_len.saturating_sub(FIRST_TRACE_OFFSET);
    let stride = stride.max(1) as u64;
    TraceCount {
        count: (data / stride) as usize,
        remainder: data % stride,
    }
}

/// Bytes per trace record: header plus `ns` encoded samples.
pub fn trace_stride(ns: usize, format: SampleFormat) -> usize {
    TRACE_HEADER_BYTES + trace::payload_len(ns, format)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Read,
    Write,
}

/// An open SEG-Y session.
///
/// `S` is the stream. Pass `&mut File` (or any `&mut` stream) to keep
/// ownership on the caller's side; the session must not outlive it.
#[derive(Debug)]
pub struct SegyFile<S> {
    stream: S,
    mode: Mode,
    format: SampleFormat,
    samples_per_trace: usize,
    sample_interval: f32,
    trace_stride: usize,
    trace_count: usize,
    trailing_bytes: u64,
    traces_written: usize,
    text_header: Box<[u8; TEXT_HEADER_BYTES]>,
    binary_header_raw: Box<[u8; BINARY_HEADER_BYTES]>,
    binary_header: BinaryHeader,
    scratch: Vec<u8>,
}

impl<S> SegyFile<S> {
    fn blank(stream: S, mode: Mode, ns: usize, dt: f32, format: SampleFormat) -> Self {
        let stride = trace_stride(ns, format);
        Self {
            stream,
            mode,
            format,
            samples_per_trace: ns,
            sample_interval: dt,
            trace_stride: stride,
            trace_count: 0,
            trailing_bytes: 0,
            traces_written: 0,
            text_header: Box::new([0; TEXT_HEADER_BYTES]),
            binary_header_raw: Box::new([0; BINARY_HEADER_BYTES]),
            binary_header: BinaryHeader::new(),
            scratch: vec![0; stride],
        }
    }

    /// Start a write session.
    ///
    /// The binary header's `hns`, `hdt` and `format` fields are filled from
    /// `config`; nothing is written to the stream yet. Both `hns` and `hdt` are
    /// unsigned 16-bit on disk, so a sample count above 65535 or an interval
    /// above 65535 µs fails with [`SegyError::ValueOutOfRange`].
    pub fn open_write(stream: S, config: SegyConfig) -> Result<Self> {
        let ns = header::sample_count_field(config.samples_per_trace)?;
        let micros = config.interval_micros()?;
        let mut file = Self::blank(
            stream,
            Mode::Write,
            config.samples_per_trace,
            f32::from(micros) / 1_000_000.0,
            config.format,
        );
        file.trace_count = config.trace_count;

        let bh = file.binary_header.values_mut();
        bh[binary_keys::HNS] = i32::from(ns);
        bh[binary_keys::HDT] = i32::from(micros);
        bh[binary_keys::FORMAT] = config.format.to_code();

        debug!(
            format = %config.format,
            ns = config.samples_per_trace,
            dt_us = micros,
            stride = file.trace_stride,
            ntrace = config.trace_count,
            "opened SEG-Y for writing"
        );
        Ok(file)
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn samples_per_trace(&self) -> usize {
        self.samples_per_trace
    }

    /// Sample interval in seconds.
    pub fn sample_interval(&self) -> f32 {
        self.sample_interval
    }

    /// Bytes per trace record, header included.
    pub fn trace_stride(&self) -> usize {
        self.trace_stride
    }

    /// Derived trace count for a read session, declared count for a write session.
    pub fn trace_count(&self) -> usize {
        self.trace_count
    }

    /// Bytes after the last whole trace when the count was derived.
    pub fn trailing_bytes(&self) -> u64 {
        self.trailing_bytes
    }

    pub fn traces_written(&self) -> usize {
        self.traces_written
    }

    /// Change the sample count, resizing the trace stride and scratch buffer.
    ///
    /// A count above 65535 fails with [`SegyError::ValueOutOfRange`] and
    /// leaves the session unchanged.
    pub fn set_samples_per_trace(&mut self, ns: usize) -> Result<()> {
        let hns = header::sample_count_field(ns)?;
        self.samples_per_trace = ns;
        self.binary_header.values_mut()[binary_keys::HNS] = i32::from(hns);
        self.resize_stride();
        Ok(())
    }

    /// Change the sample format, resizing the trace stride and scratch buffer.
    pub fn set_format(&mut self, format: SampleFormat) {
        self.format = format;
        self.binary_header.values_mut()[binary_keys::FORMAT] = format.to_code();
        self.resize_stride();
    }

    fn resize_stride(&mut self) {
        self.trace_stride = trace_stride(self.samples_per_trace, self.format);
        self.scratch.resize(self.trace_stride, 0);
    }

    pub fn text_header(&self) -> &[u8; TEXT_HEADER_BYTES] {
        &self.text_header
    }

    pub fn text_header_mut(&mut self) -> &mut [u8; TEXT_HEADER_BYTES] {
        &mut self.text_header
    }

    /// Replace the textual header with `text`, padded with spaces.
    ///
    /// Text longer than 3200 bytes is cut off.
    pub fn set_text_header(&mut self, text: &str) {
        let bytes = text.as_bytes();
        for (i, slot) in self.text_header.iter_mut().enumerate() {
            *slot = bytes.get(i).copied().unwrap_or(b' ');
        }
    }

    /// Working values of the 27 binary header fields.
    pub fn binary_header(&self) -> &BinaryHeader {
        &self.binary_header
    }

    pub fn binary_header_mut(&mut self) -> &mut BinaryHeader {
        &mut self.binary_header
    }

    /// The packed 400-byte binary header, for use with [`crate::raw`].
    pub fn binary_header_raw(&self) -> &[u8; BINARY_HEADER_BYTES] {
        &self.binary_header_raw
    }

    pub fn binary_header_raw_mut(&mut self) -> &mut [u8; BINARY_HEADER_BYTES] {
        &mut self.binary_header_raw
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// End the session and hand the stream back.
    pub fn close(self) -> S {
        if self.mode == Mode::Write
            && self.trace_count != 0
            && self.traces_written != self.trace_count
        {
            warn!(
                declared = self.trace_count,
                written = self.traces_written,
                "trace count differs from declared ntrace"
            );
        }
        self.stream
    }

    /// Iterate over the remaining traces.
    pub fn traces(&mut self) -> Traces<'_, S> {
        Traces::new(self)
    }
}

impl<S: Read + Seek> SegyFile<S> {
    /// Open a session for reading with an ASCII textual header.
    pub fn open_read(stream: S) -> Result<Self> {
        Self::open_read_with(stream, TextEncoding::Ascii)
    }

    /// Open a session for reading.
    ///
    /// Reads the textual header (decoding it if `encoding` is EBCDIC) and the
    /// binary header from the current stream position, then derives the trace
    /// stride and count. A trace area that does not divide into whole traces is
    /// logged and the partial trace is ignored; see [`SegyFile::trailing_bytes`].
    pub fn open_read_with(stream: S, encoding: TextEncoding) -> Result<Self> {
        let mut file = Self::blank(stream, Mode::Read, 0, 0.0, SampleFormat::IbmFloat32);
        file.read_text_header(encoding)?;
        file.read_binary_header()?;
        file.refresh_trace_count()?;

        debug!(
            format = %file.format,
            ns = file.samples_per_trace,
            dt = file.sample_interval,
            stride = file.trace_stride,
            ntrace = file.trace_count,
            "opened SEG-Y for reading"
        );
        Ok(file)
    }

    /// Re-derive the trace count from the stream length.
    ///
    /// The stream position is restored afterwards.
    pub fn refresh_trace_count(&mut self) -> Result<TraceCount> {
        let pos = self.stream.stream_position()?;
        let len = self.stream.seek(SeekFrom::End(0))?;
        self.stream.seek(SeekFrom::Start(pos))?;

        let derived = derive_trace_count(len, self.trace_stride);
        if !derived.is_exact() {
            warn!(
                stream_len = len,
                stride = self.trace_stride,
                trailing = derived.remainder,
                "trace area is not a whole number of traces; ignoring partial trace"
            );
        }
        self.trace_count = derived.count;
        self.trailing_bytes = derived.remainder;
        Ok(derived)
    }
}

impl<S: Seek> SegyFile<S> {
    /// Position the stream just past the textual header without touching it.
    pub fn skip_text_header(&mut self) -> Result<()> {
        self.stream.seek(SeekFrom::Start(TEXT_HEADER_BYTES as u64))?;
        Ok(())
    }
}

impl<S: Read> SegyFile<S> {
    /// Read the 3200-byte textual header, decoding EBCDIC if asked.
    pub fn read_text_header(&mut self, encoding: TextEncoding) -> Result<()> {
        read_block(&mut self.stream, &mut self.text_header[..])?;
        if encoding == TextEncoding::Ebcdic {
            ebcdic::to_ascii(&mut self.text_header[..]);
        }
        Ok(())
    }

    /// Read the 400-byte binary header and refresh the derived parameters.
    ///
    /// Fails with [`SegyError::UnsupportedSampleFormat`] if the format code is
    /// not 1, 2, 3 or 5. On any failure the session's headers and parameters
    /// are left as they were.
    pub fn read_binary_header(&mut self) -> Result<()> {
        let mut raw = [0u8; BINARY_HEADER_BYTES];
        read_block(&mut self.stream, &mut raw)?;
        let format = SampleFormat::from_code(i32::from(header::format_code(&raw)))?;
        let mut fields = BinaryHeader::new();
        fields.unpack_from(&raw)?;

        *self.binary_header_raw = raw;
        self.binary_header = fields;
        self.format = format;
        self.samples_per_trace = usize::from(header::sample_count(&raw));
        self.sample_interval = header::sample_interval(&raw);
        self.resize_stride();
        Ok(())
    }

    /// Read the next trace into caller buffers.
    ///
    /// Returns `Ok(false)` at a clean end of stream. A trace cut short by the
    /// end of the stream fails with [`SegyError::ShortRead`]. `samples` must
    /// hold at least [`SegyFile::samples_per_trace`] values; only that many
    /// are written.
    pub fn read_trace_into(&mut self, header: &mut TraceHeader, samples: &mut [f32]) -> Result<bool> {
        let ns = self.samples_per_trace;
        let actual = samples.len();
        let samples = samples
            .get_mut(..ns)
            .ok_or(SegyError::SampleCountMismatch {
                expected: ns,
                actual,
            })?;

        let n = read_full(&mut self.stream, &mut self.scratch)?;
        if n == 0 {
            return Ok(false);
        }
        if n < self.scratch.len() {
            return Err(SegyError::ShortRead {
                expected: self.scratch.len(),
                actual: n,
            });
        }

        header.unpack_from(&self.scratch)?;
        trace::decode_samples_into(&self.scratch[TRACE_HEADER_BYTES..], self.format, samples)?;
        Ok(true)
    }

    /// Read the next trace, or `None` at a clean end of stream.
    pub fn read_trace(&mut self) -> Result<Option<Trace>> {
        let mut header = TraceHeader::new();
        let mut samples = vec![0.0; self.samples_per_trace];
        if self.read_trace_into(&mut header, &mut samples)? {
            Ok(Some(Trace::new(header, samples)))
        } else {
            Ok(None)
        }
    }
}

impl<S: Write> SegyFile<S> {
    /// Write the 3200-byte textual header, encoding to EBCDIC if asked.
    ///
    /// The session's copy of the header stays as it is.
    pub fn write_text_header(&mut self, encoding: TextEncoding) -> Result<()> {
        if encoding == TextEncoding::Ebcdic {
            let mut encoded = *self.text_header;
            ebcdic::to_ebcdic(&mut encoded);
            self.stream.write_all(&encoded)?;
        } else {
            self.stream.write_all(&self.text_header[..])?;
        }
        Ok(())
    }

    /// Pack the working binary header fields and write the 400-byte block.
    ///
    /// Bytes outside the 27 registered fields are written as they are in
    /// [`SegyFile::binary_header_raw`].
    pub fn write_binary_header(&mut self) -> Result<()> {
        self.binary_header.pack_into(&mut self.binary_header_raw[..])?;

        let bh = self.binary_header.values();
        for (key, name) in [
            (binary_keys::HDT, "hdt"),
            (binary_keys::HNS, "hns"),
            (binary_keys::FORMAT, "format"),
        ] {
            if bh[key] == 0 {
                warn!(field = name, "binary header field not set");
            }
        }

        self.stream.write_all(&self.binary_header_raw[..])?;
        Ok(())
    }

    /// Encode and write one trace in a single stream write.
    ///
    /// `samples` must hold at least [`SegyFile::samples_per_trace`] values;
    /// extra values are ignored.
    pub fn write_trace(&mut self, header: &TraceHeader, samples: &[f32]) -> Result<()> {
        let ns = self.samples_per_trace;
        let samples = samples.get(..ns).ok_or(SegyError::SampleCountMismatch {
            expected: ns,
            actual: samples.len(),
        })?;

        header.pack_into(&mut self.scratch)?;
        trace::encode_samples_into(samples, self.format, &mut self.scratch[TRACE_HEADER_BYTES..])?;
        self.stream.write_all(&self.scratch)?;
        self.traces_written += 1;
        Ok(())
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let n = read_full(reader, buf)?;
    if n != buf.len() {
        return Err(SegyError::ShortRead {
            expected: buf.len(),
            actual: n,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::trace_keys;
    use crate::raw::{self, RawKind, RawValue};
    use std::io::Cursor;

    fn make_header(tracl: i32, sx: i32) -> TraceHeader {
        TraceHeader::new()
            .with_field("tracl", tracl)
            .unwrap()
            .with_field("sx", sx)
            .unwrap()
    }

    fn write_file(config: SegyConfig, traces: &[(TraceHeader, Vec<f32>)]) -> Vec<u8> {
        let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
        file.set_text_header("C 1 TEST FILE");
        file.write_text_header(TextEncoding::Ascii).unwrap();
        file.write_binary_header().unwrap();
        for (header, samples) in traces {
            file.write_trace(header, samples).unwrap();
        }
        file.close().into_inner()
    }

    #[test]
    fn test_write_layout() {
        let config = SegyConfig::new(4, 0.002, SampleFormat::IeeeFloat32).with_trace_count(1);
        let bytes = write_file(config, &[(make_header(1, 0), vec![1.0, 2.0, 3.0, 4.0])]);

        assert_eq!(bytes.len(), 3600 + 240 + 16);
        assert_eq!(&bytes[..13], b"C 1 TEST FILE");
        assert_eq!(bytes[13], b' ');
        // hdt, hns, format at fixed offsets of the binary header
        assert_eq!(&bytes[3216..3218], &2000u16.to_be_bytes());
        assert_eq!(&bytes[3220..3222], &4u16.to_be_bytes());
        assert_eq!(&bytes[3224..3226], &5u16.to_be_bytes());
        // tracl, then the first sample
        assert_eq!(&bytes[3600..3604], &1i32.to_be_bytes());
        assert_eq!(&bytes[3840..3844], &1.0f32.to_be_bytes());
    }

    #[test]
    fn test_read_back() {
        let config = SegyConfig::new(3, 0.004, SampleFormat::IbmFloat32);
        let traces = vec![
            (make_header(1, 0), vec![0.5, -1.0, 100.125]),
            (make_header(2, 10), vec![1.0, 2.0, 4.0]),
        ];
        let bytes = write_file(config, &traces);

        let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.format(), SampleFormat::IbmFloat32);
        assert_eq!(file.samples_per_trace(), 3);
        assert_eq!(file.sample_interval(), 0.004);
        assert_eq!(file.trace_stride(), 240 + 12);
        assert_eq!(file.trace_count(), 2);
        assert_eq!(file.trailing_bytes(), 0);

        for (header, samples) in &traces {
            let trace = file.read_trace().unwrap().unwrap();
            assert_eq!(&trace.header, header);
            assert_eq!(&trace.samples, samples);
        }
        assert!(file.read_trace().unwrap().is_none());
    }

    #[test]
    fn test_ebcdic_text_header() {
        let config = SegyConfig::new(1, 0.001, SampleFormat::Int16);
        let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
        file.set_text_header("C 1 CLIENT ACME");
        file.write_text_header(TextEncoding::Ebcdic).unwrap();
        // The in-memory copy is left as ASCII
        assert_eq!(&file.text_header()[..3], b"C 1");
        file.write_binary_header().unwrap();
        let bytes = file.close().into_inner();

        // 'C' in EBCDIC, and spaces pad to 0x40
        assert_eq!(bytes[0], 0xC3);
        assert_eq!(bytes[3199], 0x40);

        let file = SegyFile::open_read_with(Cursor::new(bytes.clone()), TextEncoding::Ebcdic).unwrap();
        assert_eq!(&file.text_header()[..15], b"C 1 CLIENT ACME");

        // Without decoding, the raw EBCDIC bytes are kept
        let file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.text_header()[0], 0xC3);
    }

    #[test]
    fn test_skip_text_header() {
        let config = SegyConfig::new(2, 0.002, SampleFormat::Int32);
        let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
        file.skip_text_header().unwrap();
        file.write_binary_header().unwrap();
        let bytes = file.close().into_inner();

        assert_eq!(bytes.len(), 3600);
        assert!(bytes[..3200].iter().all(|&b| b == 0));

        let mut cursor = Cursor::new(bytes);
        let mut file = SegyFile::open_read(&mut cursor).unwrap();
        assert_eq!(file.format(), SampleFormat::Int32);
        file.skip_text_header().unwrap();
        file.read_binary_header().unwrap();
        assert_eq!(file.samples_per_trace(), 2);
        drop(file);
        assert_eq!(cursor.position(), 3600);
    }

    #[test]
    fn test_raw_bytes_outside_registry_survive() {
        let config = SegyConfig::new(1, 0.002, SampleFormat::IeeeFloat32);
        let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
        file.binary_header_mut().set("jobid", 10).unwrap();
        raw::write_value(file.binary_header_raw_mut(), 302, RawValue::Int16(100)).unwrap();
        file.write_text_header(TextEncoding::Ascii).unwrap();
        file.write_binary_header().unwrap();
        let bytes = file.close().into_inner();

        let file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.binary_header().get("jobid").unwrap(), 10);
        assert_eq!(
            raw::read_value(file.binary_header_raw(), 302, RawKind::Int16).unwrap(),
            RawValue::Int16(100)
        );
    }

    #[test]
    fn test_unsupported_format_on_open() {
        let mut bytes = vec![0u8; 3600];
        bytes[3224..3226].copy_from_slice(&4u16.to_be_bytes());
        assert!(matches!(
            SegyFile::open_read(Cursor::new(bytes)),
            Err(SegyError::UnsupportedSampleFormat(4))
        ));
    }

    #[test]
    fn test_truncated_headers() {
        assert!(matches!(
            SegyFile::open_read(Cursor::new(vec![0u8; 1000])),
            Err(SegyError::ShortRead {
                expected: 3200,
                actual: 1000
            })
        ));
        assert!(matches!(
            SegyFile::open_read(Cursor::new(vec![0u8; 3500])),
            Err(SegyError::ShortRead {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_partial_trace_is_short_read() {
        let config = SegyConfig::new(4, 0.002, SampleFormat::IeeeFloat32);
        let mut bytes = write_file(
            config,
            &[
                (make_header(1, 0), vec![1.0; 4]),
                (make_header(2, 0), vec![2.0; 4]),
            ],
        );
        bytes.truncate(bytes.len() - 5);

        let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.trace_count(), 1);
        assert_eq!(file.trailing_bytes(), 256 - 5);
        assert!(file.read_trace().unwrap().is_some());
        assert!(matches!(
            file.read_trace(),
            Err(SegyError::ShortRead {
                expected: 256,
                actual: 251
            })
        ));
    }

    #[test]
    fn test_derive_trace_count() {
        let stride = 240 + 4 * 4;
        for k in [0u64, 1, 2, 1000] {
            let len = 3600 + k * stride as u64;
            let count = derive_trace_count(len, stride);
            assert_eq!(count.count as u64, k);
            assert!(count.is_exact());
            assert_eq!(count.exact(stride).unwrap() as u64, k);
        }

        // A partial trailing trace is dropped by truncating division
        let count = derive_trace_count(3600 + 2 * stride as u64 + 100, stride);
        assert_eq!(count.count, 2);
        assert_eq!(count.remainder, 100);
        assert!(matches!(
            count.exact(stride),
            Err(SegyError::MalformedFile {
                remainder: 100,
                stride: 256
            })
        ));

        // Shorter than the headers: nothing to count
        assert_eq!(derive_trace_count(100, stride).count, 0);
    }

    #[test]
    fn test_sample_count_mismatch() {
        let config = SegyConfig::new(4, 0.002, SampleFormat::IeeeFloat32);
        let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
        assert!(matches!(
            file.write_trace(&TraceHeader::new(), &[1.0, 2.0]),
            Err(SegyError::SampleCountMismatch {
                expected: 4,
                actual: 2
            })
        ));
        assert_eq!(file.traces_written(), 0);

        // Extra samples are ignored
        file.write_trace(&TraceHeader::new(), &[0.0; 8]).unwrap();
        assert_eq!(file.get_ref().get_ref().len(), 256);
    }

    #[test]
    fn test_read_into_reuses_buffers() {
        let config = SegyConfig::new(2, 0.002, SampleFormat::Int16);
        let bytes = write_file(
            config,
            &[
                (make_header(1, 5), vec![1.9, -1.9]),
                (make_header(2, 0), vec![300.0, 7.0]),
            ],
        );

        let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        let mut header = TraceHeader::new();
        let mut samples = [0.0f32; 3];

        assert!(file.read_trace_into(&mut header, &mut samples).unwrap());
        assert_eq!(header.values()[trace_keys::SX], 5);
        assert_eq!(samples, [1.0, -1.0, 0.0]);

        assert!(file.read_trace_into(&mut header, &mut samples).unwrap());
        // Every field is rewritten, including zeros
        assert_eq!(header.values()[trace_keys::SX], 0);
        assert_eq!(samples, [300.0, 7.0, 0.0]);

        assert!(!file.read_trace_into(&mut header, &mut samples).unwrap());
    }

    #[test]
    fn test_parameter_changes_resize_stride() {
        let config = SegyConfig::new(10, 0.002, SampleFormat::IeeeFloat32);
        let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
        assert_eq!(file.trace_stride(), 280);

        file.set_format(SampleFormat::Int16);
        assert_eq!(file.trace_stride(), 260);
        assert_eq!(file.binary_header().get("format").unwrap(), 3);

        file.set_samples_per_trace(20).unwrap();
        assert_eq!(file.trace_stride(), 280);
        assert_eq!(file.binary_header().get("hns").unwrap(), 20);

        file.write_trace(&TraceHeader::new(), &[0.0; 20]).unwrap();
        assert_eq!(file.get_ref().get_ref().len(), 280);
    }

    #[test]
    fn test_interval_conventions() {
        let micros = |dt| SegyConfig::new(1, dt, SampleFormat::Int32).interval_micros();
        assert_eq!(micros(0.002).unwrap(), 2000);
        assert_eq!(micros(0.0005).unwrap(), 500);
        // Values above 1 are milliseconds
        assert_eq!(micros(4.0).unwrap(), 4000);
        assert_eq!(micros(65.0).unwrap(), 65_000);
        assert!(micros(66.0).is_err());
        assert!(micros(0.1).is_err());
    }

    #[test]
    fn test_open_write_rejects_wide_sample_count() {
        let config = SegyConfig::new(70_000, 0.002, SampleFormat::IeeeFloat32);
        assert!(matches!(
            SegyFile::open_write(Cursor::new(Vec::<u8>::new()), config),
            Err(SegyError::ValueOutOfRange {
                field: "hns",
                value: 70_000,
                max: 65_535
            })
        ));

        // The widest count that fits reads back unchanged
        let config = SegyConfig::new(65_535, 0.002, SampleFormat::Int16);
        let bytes = write_file(config, &[(make_header(1, 0), vec![0.0; 65_535])]);
        let file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.samples_per_trace(), 65_535);
        assert_eq!(file.trace_count(), 1);
        assert_eq!(file.trailing_bytes(), 0);
    }

    #[test]
    fn test_open_write_rejects_long_interval() {
        // 0.1 s is 100000 µs, past the 16-bit hdt field
        let config = SegyConfig::new(4, 0.1, SampleFormat::IeeeFloat32);
        assert!(matches!(
            SegyFile::open_write(Cursor::new(Vec::<u8>::new()), config),
            Err(SegyError::ValueOutOfRange {
                field: "hdt",
                value: 100_000,
                ..
            })
        ));

        let config = SegyConfig::new(4, 0.065, SampleFormat::IeeeFloat32);
        let bytes = write_file(config, &[]);
        let file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.sample_interval(), 0.065);
    }

    #[test]
    fn test_set_samples_per_trace_limit() {
        let config = SegyConfig::new(10, 0.002, SampleFormat::IeeeFloat32);
        let mut file = SegyFile::open_write(Cursor::new(Vec::<u8>::new()), config).unwrap();
        assert!(file.set_samples_per_trace(65_536).is_err());
        assert_eq!(file.samples_per_trace(), 10);
        assert_eq!(file.trace_stride(), 280);
        assert_eq!(file.binary_header().get("hns").unwrap(), 10);
    }

    #[test]
    fn test_bad_format_leaves_session_unchanged() {
        let config = SegyConfig::new(4, 0.002, SampleFormat::IeeeFloat32);
        let mut bytes = write_file(config, &[]);
        // A second binary header with format 4 and jobid 9
        let mut bad = bytes[3200..3600].to_vec();
        bad[0..4].copy_from_slice(&9i32.to_be_bytes());
        bad[24..26].copy_from_slice(&4u16.to_be_bytes());
        bad[20..22].copy_from_slice(&8u16.to_be_bytes());
        bytes.extend_from_slice(&bad);

        let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        let raw_before = *file.binary_header_raw();
        let fields_before = file.binary_header().clone();

        assert!(matches!(
            file.read_binary_header(),
            Err(SegyError::UnsupportedSampleFormat(4))
        ));
        assert_eq!(file.binary_header_raw(), &raw_before);
        assert_eq!(file.binary_header(), &fields_before);
        assert_eq!(file.binary_header().get("jobid").unwrap(), 0);
        assert_eq!(file.format(), SampleFormat::IeeeFloat32);
        assert_eq!(file.samples_per_trace(), 4);
        assert_eq!(file.trace_stride(), 256);
    }

    #[test]
    fn test_zero_samples_per_trace() {
        let config = SegyConfig::new(0, 0.002, SampleFormat::IeeeFloat32);
        let bytes = write_file(
            config,
            &[(make_header(1, 0), vec![]), (make_header(2, 0), vec![])],
        );
        let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
        assert_eq!(file.trace_stride(), 240);
        assert_eq!(file.trace_count(), 2);
        let trace = file.read_trace().unwrap().unwrap();
        assert_eq!(trace.header.get("tracl").unwrap(), 1);
        assert!(trace.samples.is_empty());
    }
}
