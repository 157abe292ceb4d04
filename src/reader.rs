//! Iterator over the traces of an open read session.
//!
//! Use [`SegyFile::traces`] to get a [`Traces`] iterator.

use std::io::Read;

use crate::Result;
use crate::session::SegyFile;
use crate::trace::Trace;

/// Iterator over the remaining traces of a [`SegyFile`].
///
/// Each call to `next()` reads one trace and advances the stream past it.
/// Iteration stops at a clean end of stream or after the first error.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use segy_rs::{SampleFormat, SegyConfig, SegyFile, TextEncoding, TraceHeader};
///
/// let config = SegyConfig::new(3, 0.002, SampleFormat::IeeeFloat32);
/// let mut out = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
/// out.write_text_header(TextEncoding::Ascii).unwrap();
/// out.write_binary_header().unwrap();
/// out.write_trace(&TraceHeader::new(), &[1.0, 2.0, 3.0]).unwrap();
/// let bytes = out.close().into_inner();
///
/// let mut file = SegyFile::open_read(Cursor::new(bytes)).unwrap();
/// let traces: Vec<_> = file
///     .traces()
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(traces.len(), 1);
/// ```
pub struct Traces<'a, S> {
    file: &'a mut SegyFile<S>,
    done: bool,
}

impl<'a, S> Traces<'a, S> {
    pub(crate) fn new(file: &'a mut SegyFile<S>) -> Self {
        Self { file, done: false }
    }
}

impl<S: Read> Iterator for Traces<'_, S> {
    type Item = Result<Trace>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.file.read_trace() {
            Ok(Some(trace)) => Some(Ok(trace)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                // Stop after reporting the error once
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
