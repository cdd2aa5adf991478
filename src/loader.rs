//! Reads a storefront export into a normalized [`Dataset`].
//!
//! The whole file is read in one blocking call and parsed from memory. Only
//! two conditions abort a load: the path not resolving to a readable file
//! ([`LoadError::SourceNotFound`]) and the bytes not parsing as delimited text
//! ([`LoadError::MalformedSource`]). Everything below that is absorbed by the
//! per-field coercions.

use std::{fs, path::Path};

use anyhow::Context;
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use crate::{
    error::LoadError,
    io_utils,
    record::{Dataset, HeaderLayout},
    tally::Tally,
};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field delimiter; inferred from the file extension when `None`.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|err| {
        debug!("Reading {path:?} failed: {err}");
        LoadError::SourceNotFound {
            path: path.to_path_buf(),
        }
    })?;
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    debug!(
        "Parsing {} byte(s) from {:?} with delimiter '{}' and encoding {}",
        bytes.len(),
        path,
        io_utils::printable_delimiter(delimiter),
        options.encoding.name()
    );
    let dataset = parse_dataset(&bytes, delimiter, options.encoding)
        .map_err(|err| LoadError::malformed(path, format!("{err:#}")))?;
    info!(
        "Loaded {} record(s) with {} field(s) from {:?}",
        dataset.len(),
        dataset.layout.slots.len(),
        path
    );
    Ok(dataset)
}

/// Parses an in-memory delimited source.
pub fn parse_dataset(
    bytes: &[u8],
    delimiter: u8,
    encoding: &'static Encoding,
) -> anyhow::Result<Dataset> {
    let bytes = io_utils::strip_bom(bytes, encoding);
    let mut reader = io_utils::open_csv_reader(bytes, delimiter);
    let headers = io_utils::reader_headers(&mut reader, encoding).context("Reading header row")?;
    let layout = HeaderLayout::resolve(&headers);

    let mut fallbacks: Tally<String, usize> = Tally::new();
    let mut records = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        records.push(layout.normalize_row_with(&decoded, |slot| {
            fallbacks.add(slot.key.clone(), 1);
        }));
    }

    for (key, count) in fallbacks.iter() {
        debug!("Field '{key}' fell back to its default in {count} row(s)");
    }
    Ok(Dataset { layout, records })
}
