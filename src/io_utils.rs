//! I/O utilities for CSV reading, decoding, and delimiter resolution.
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **Reader construction**: readers are flexible so ragged rows reach the
//!   normalizer instead of failing the parse.

use std::io::Read;

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &std::path::Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

/// Decodes one cell strictly in `encoding`; cells never switch encoding on a BOM.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            anyhow!(
                "Failed to decode text with encoding {}",
                encoding.name()
            )
        })
}

/// Drops a leading byte-order mark that matches `encoding`.
pub fn strip_bom<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> &'a [u8] {
    match Encoding::for_bom(bytes) {
        Some((bom_encoding, length)) if bom_encoding == encoding => &bytes[length..],
        _ => bytes,
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
