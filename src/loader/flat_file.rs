use crate::errors::LoadError;
use crate::loader::resolve_columns;
use crate::model::{Cell, Schema};
use csv::Trim;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load a comma-delimited file with a header row into records of schema `S`.
///
/// The file is decoded as UTF-8 unless `encoding` names another encoding
/// (any WHATWG label, e.g. `"windows-1252"` or `"latin1"`). Only the schema's
/// columns are kept. Lines with more fields than the header are skipped, as
/// are rows the schema rejects; lines with fewer fields are padded with
/// missing values.
pub fn load_file<S: Schema>(path: &Path, encoding: Option<&str>) -> Result<Vec<S>, LoadError> {
    let bytes = fs::read(path)?;
    let text = decode(&bytes, encoding)?;
    let records = load_str(&text)?;

    debug!(path = %path.display(), rows = records.len(), "loaded flat file");
    Ok(records)
}

/// Parse already-decoded CSV text into records of schema `S`.
pub fn load_str<S: Schema>(text: &str) -> Result<Vec<S>, LoadError> {
    // Note: flexible so that a short or long line is reported per record
    // instead of failing the whole read.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let width = headers.len();
    let positions = resolve_columns::<S>(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping malformed line");
                continue;
            }
        };

        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        if record.len() > width {
            warn!(
                line,
                fields = record.len(),
                expected = width,
                "skipping malformed line"
            );
            continue;
        }

        let cells = positions
            .iter()
            .map(|position| match position.and_then(|idx| record.get(idx)) {
                Some(value) if !value.is_empty() => Cell::Text(value.to_string()),
                _ => Cell::Null,
            })
            .collect();

        match S::from_cells(cells) {
            Some(parsed) => records.push(parsed),
            None => warn!(line, "skipping row that does not match the expected columns"),
        }
    }

    Ok(records)
}

/// Decode raw bytes using the named encoding, or UTF-8 when none is given.
/// A byte-order mark, if present, takes precedence over the label.
fn decode(bytes: &[u8], label: Option<&str>) -> Result<String, LoadError> {
    let encoding = match label {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| LoadError::UnknownEncoding(label.to_string()))?,
        None => encoding_rs::UTF_8,
    };

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(LoadError::Decode {
            encoding: actual.name(),
        });
    }

    Ok(text.into_owned())
}
