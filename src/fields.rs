//! Field registries for the SEG-Y binary header and trace header.
//!
//! Each registry is an ordered, immutable table of [`FieldSpec`] entries. A
//! field's ordinal position in its table is its key index, and its byte offset
//! is the sum of the widths of every field before it. Lookup by name is a
//! linear scan; the tables are small and static.

use crate::{Result, SegyError};

/// Bytes in the textual (card image) header.
pub const TEXT_HEADER_BYTES: usize = 3200;
/// Bytes in the binary header.
pub const BINARY_HEADER_BYTES: usize = 400;
/// Bytes in a trace header.
pub const TRACE_HEADER_BYTES: usize = 240;
/// Number of named binary header fields.
pub const BINARY_HEADER_KEYS: usize = 27;
/// Number of named trace header fields.
pub const TRACE_HEADER_KEYS: usize = 91;

/// Key indices of frequently used trace header fields.
pub mod trace_keys {
    pub const TRACL: usize = 0;
    pub const TRACR: usize = 1;
    pub const FLDR: usize = 2;
    pub const CDP: usize = 5;
    pub const OFFSET: usize = 11;
    pub const SCALCO: usize = 20;
    pub const SX: usize = 21;
    pub const SY: usize = 22;
    pub const GX: usize = 23;
    pub const GY: usize = 24;
    pub const NS: usize = 38;
    pub const DT: usize = 39;
    pub const CDPX: usize = 71;
    pub const CDPY: usize = 72;
}

/// Key indices of the binary header fields the session keeps in sync.
pub mod binary_keys {
    pub const JOBID: usize = 0;
    pub const HDT: usize = 5;
    pub const HNS: usize = 7;
    pub const FORMAT: usize = 9;
}

/// Name and on-disk width (2 or 4 bytes) of one header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
}

impl FieldSpec {
    pub const fn new(name: &'static str, width: usize) -> Self {
        Self { name, width }
    }
}

/// An ordered field registry.
#[derive(Debug)]
pub struct FieldTable {
    label: &'static str,
    fields: &'static [FieldSpec],
}

/// Registry of the 27 binary header fields (60 packed bytes).
pub static BINARY_HEADER: FieldTable = FieldTable {
    label: "binary header",
    fields: &BINARY_HEADER_FIELDS,
};

/// Registry of the 91 trace header fields (240 packed bytes).
pub static TRACE_HEADER: FieldTable = FieldTable {
    label: "trace header",
    fields: &TRACE_HEADER_FIELDS,
};

impl FieldTable {
    /// Human-readable table name, used in error messages.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Look up a field spec by ordinal.
    pub fn get(&self, index: usize) -> Result<&'static FieldSpec> {
        self.fields.get(index).ok_or(SegyError::IndexOutOfRange {
            table: self.label,
            index,
            len: self.fields.len(),
        })
    }

    /// Ordinal of the field called `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| SegyError::UnknownField {
                table: self.label,
                name: name.to_string(),
            })
    }

    /// Name of the field at `index`.
    pub fn name_of(&self, index: usize) -> Result<&'static str> {
        self.get(index).map(|f| f.name)
    }

    /// Byte offset of the field at `index` within the packed block.
    pub fn offset_of(&self, index: usize) -> Result<usize> {
        self.get(index)?;
        Ok(self.packed_len(index))
    }

    /// Packed byte length of the first `nk` fields.
    ///
    /// `nk` is clamped to the table length.
    pub fn packed_len(&self, nk: usize) -> usize {
        self.fields.iter().take(nk).map(|f| f.width).sum()
    }
}

/// Ordinal of `name` in `table`.
pub fn field_index(table: &FieldTable, name: &str) -> Result<usize> {
    table.index_of(name)
}

/// Name of the field at `ordinal` in `table`.
pub fn field_name(table: &FieldTable, ordinal: usize) -> Result<&'static str> {
    table.name_of(ordinal)
}

/// Key index of a trace header field, e.g. `trace_key("sx")`.
pub fn trace_key(name: &str) -> Result<usize> {
    TRACE_HEADER.index_of(name)
}

/// Key index of a binary header field, e.g. `binary_key("jobid")`.
pub fn binary_key(name: &str) -> Result<usize> {
    BINARY_HEADER.index_of(name)
}

pub const BINARY_HEADER_FIELDS: [FieldSpec; BINARY_HEADER_KEYS] = [
    FieldSpec::new("jobid", 4), // 0: job identification number
    FieldSpec::new("lino", 4), // 4: line number
    FieldSpec::new("reno", 4), // 8: reel number
    FieldSpec::new("ntrpr", 2), // 12: data traces per ensemble
    FieldSpec::new("nart", 2), // 14: auxiliary traces per ensemble
    FieldSpec::new("hdt", 2), // 16: sample interval (µs)
    FieldSpec::new("dto", 2), // 18: original field sample interval
    FieldSpec::new("hns", 2), // 20: samples per trace
    FieldSpec::new("nso", 2), // 22: original field samples per trace
    FieldSpec::new("format", 2), // 24: sample format code
    FieldSpec::new("fold", 2), // 26: ensemble fold
    FieldSpec::new("tsort", 2), // 28: trace sorting code
    FieldSpec::new("vscode", 2), // 30: vertical sum code
    FieldSpec::new("hsfs", 2), // 32: sweep frequency at start
    FieldSpec::new("hsfe", 2), // 34: sweep frequency at end
    FieldSpec::new("hslen", 2), // 36: sweep length (ms)
    FieldSpec::new("hstyp", 2), // 38: sweep type code
    FieldSpec::new("schn", 2), // 40: trace number of sweep channel
    FieldSpec::new("hstas", 2), // 42: sweep taper length at start
    FieldSpec::new("hstae", 2), // 44: sweep taper length at end
    FieldSpec::new("htatyp", 2), // 46: taper type
    FieldSpec::new("hcorr", 2), // 48: correlated data traces
    FieldSpec::new("bgrcv", 2), // 50: binary gain recovered
    FieldSpec::new("rcvm", 2), // 52: amplitude recovery method
    FieldSpec::new("mfeet", 2), // 54: measurement system
    FieldSpec::new("polyt", 2), // 56: impulse signal polarity
    FieldSpec::new("vpol", 2), // 58: vibratory polarity code
];

pub const TRACE_HEADER_FIELDS: [FieldSpec; TRACE_HEADER_KEYS] = [
    FieldSpec::new("tracl", 4), // 0
    FieldSpec::new("tracr", 4), // 4
    FieldSpec::new("fldr", 4), // 8
    FieldSpec::new("tracf", 4), // 12
    FieldSpec::new("ep", 4), // 16
    FieldSpec::new("cdp", 4), // 20
    FieldSpec::new("cdpt", 4), // 24
    FieldSpec::new("trid", 2), // 28
    FieldSpec::new("nvs", 2), // 30
    FieldSpec::new("nhs", 2), // 32
    FieldSpec::new("duse", 2), // 34
    FieldSpec::new("offset", 4), // 36
    FieldSpec::new("gelev", 4), // 40
    FieldSpec::new("selev", 4), // 44
    FieldSpec::new("sdepth", 4), // 48
    FieldSpec::new("gdel", 4), // 52
    FieldSpec::new("sdel", 4), // 56
    FieldSpec::new("swdep", 4), // 60
    FieldSpec::new("gwdep", 4), // 64
    FieldSpec::new("scalel", 2), // 68
    FieldSpec::new("scalco", 2), // 70
    FieldSpec::new("sx", 4), // 72
    FieldSpec::new("sy", 4), // 76
    FieldSpec::new("gx", 4), // 80
    FieldSpec::new("gy", 4), // 84
    FieldSpec::new("counit", 2), // 88
    FieldSpec::new("wevel", 2), // 90
    FieldSpec::new("swevel", 2), // 92
    FieldSpec::new("sut", 2), // 94
    FieldSpec::new("gut", 2), // 96
    FieldSpec::new("sstat", 2), // 98
    FieldSpec::new("gstat", 2), // 100
    FieldSpec::new("tstat", 2), // 102
    FieldSpec::new("laga", 2), // 104
    FieldSpec::new("lagb", 2), // 106
    FieldSpec::new("delrt", 2), // 108
    FieldSpec::new("muts", 2), // 110
    FieldSpec::new("mute", 2), // 112
    FieldSpec::new("ns", 2), // 114
    FieldSpec::new("dt", 2), // 116
    FieldSpec::new("gain", 2), // 118
    FieldSpec::new("igc", 2), // 120
    FieldSpec::new("igi", 2), // 122
    FieldSpec::new("corr", 2), // 124
    FieldSpec::new("sfs", 2), // 126
    FieldSpec::new("sfe", 2), // 128
    FieldSpec::new("slen", 2), // 130
    FieldSpec::new("styp", 2), // 132
    FieldSpec::new("stas", 2), // 134
    FieldSpec::new("stae", 2), // 136
    FieldSpec::new("tatyp", 2), // 138
    FieldSpec::new("afilf", 2), // 140
    FieldSpec::new("afils", 2), // 142
    FieldSpec::new("nofilf", 2), // 144
    FieldSpec::new("nofils", 2), // 146
    FieldSpec::new("lcf", 2), // 148
    FieldSpec::new("hcf", 2), // 150
    FieldSpec::new("lcs", 2), // 152
    FieldSpec::new("hcs", 2), // 154
    FieldSpec::new("year", 2), // 156
    FieldSpec::new("day", 2), // 158
    FieldSpec::new("hour", 2), // 160
    FieldSpec::new("minute", 2), // 162
    FieldSpec::new("sec", 2), // 164
    FieldSpec::new("timbas", 2), // 166
    FieldSpec::new("trwf", 2), // 168
    FieldSpec::new("grnors", 2), // 170
    FieldSpec::new("grnofr", 2), // 172
    FieldSpec::new("grnlof", 2), // 174
    FieldSpec::new("gaps", 2), // 176
    FieldSpec::new("otrav", 2), // 178
    FieldSpec::new("cdpx", 4), // 180
    FieldSpec::new("cdpy", 4), // 184
    FieldSpec::new("iline", 4), // 188
    FieldSpec::new("xline", 4), // 192
    FieldSpec::new("shnum", 4), // 196
    FieldSpec::new("shsca", 2), // 200
    FieldSpec::new("trunit", 2), // 202
    FieldSpec::new("tdcm4", 4), // 204
    FieldSpec::new("tdcm2", 2), // 208
    FieldSpec::new("tdunit", 2), // 210
    FieldSpec::new("triden", 2), // 212
    FieldSpec::new("stype", 2), // 214
    FieldSpec::new("sto", 2), // 216
    FieldSpec::new("sedxl", 4), // 218
    FieldSpec::new("sedil", 2), // 222
    FieldSpec::new("smm", 4), // 224
    FieldSpec::new("sm", 2), // 228
    FieldSpec::new("smu", 2), // 230
    FieldSpec::new("unass1", 4), // 232
    FieldSpec::new("unass2", 4), // 236
];
