//! Compile-time smoke test: verify top-level re-exports work.

use std::io::Cursor;

use segy_rs::{
    BINARY_HEADER, BinaryHeader, ByteOrder, FieldSpec, FieldTable, HeaderFields, Result,
    SampleFormat, SegyConfig, SegyError, SegyFile, TRACE_HEADER, TextEncoding, Trace, TraceCount,
    TraceHeader, Traces, decode_samples, derive_trace_count, encode_samples, ibm_to_ieee,
    ieee_to_ibm,
};

#[test]
fn top_level_imports_compile() {
    // Just verify the types are usable from the crate root
    let _: fn(&[u8], usize, SampleFormat) -> Result<Vec<f32>> = decode_samples;
    let _: fn(&[f32], SampleFormat) -> Result<Vec<u8>> = encode_samples;
    let _: fn(&[u8; 4]) -> f32 = ibm_to_ieee;
    let _: fn(f32) -> [u8; 4] = ieee_to_ibm;
    let _: fn(u64, usize) -> TraceCount = derive_trace_count;

    let _bo = ByteOrder::Big;
    let _enc = TextEncoding::default();
    let _fmt = SampleFormat::IbmFloat32;

    let _bh = BinaryHeader::new();
    let _t = Trace::new(TraceHeader::new(), vec![]);
    let _spec = FieldSpec::new("tracl", 4);
    let _tables: [&FieldTable; 2] = [&BINARY_HEADER, &TRACE_HEADER];

    let config = SegyConfig::new(1, 0.001, SampleFormat::Int16);
    let mut file = SegyFile::open_write(Cursor::new(Vec::new()), config).unwrap();
    let _: Traces<'_, Cursor<Vec<u8>>> = file.traces();

    // SegyError is accessible
    let _e: Option<SegyError> = None;
}

#[test]
fn header_fields_by_name() {
    let mut header = TraceHeader::new();
    header.set("offset", -250).unwrap();
    assert_eq!(header.get("offset").unwrap(), -250);
    assert!(matches!(
        header.get("nope"),
        Err(SegyError::UnknownField { .. })
    ));
}
