use crate::{CleanedRow, NormalizeError, RawProductRecord};
use lazy_regex::regex;
use std::{
    fs::File,
    io::BufReader,
    num::ParseFloatError,
    path::Path,
};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Applied to the parsed weight, e.g. `28.35` for ounces to grams.
    pub weight_factor: f64,
    /// Literal removed from the raw weight before parsing.
    pub weight_suffix: String,
    /// Only the text before this literal is kept for the length.
    pub length_marker: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            weight_factor: 1.0,
            weight_suffix: "oz".to_string(),
            length_marker: "yds".to_string(),
        }
    }
}

fn join_lines(name: &str) -> String {
    regex!(r"\r\n|[\r\n]").replace_all(name, " ").into_owned()
}

fn parse_weight(raw: &str, suffix: &str) -> Result<f64, ParseFloatError> {
    let stripped = if suffix.is_empty() {
        raw.to_string()
    } else {
        raw.replace(suffix, "")
    };
    stripped.trim().parse()
}

fn before_marker<'a>(raw: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return raw;
    }
    raw.split_once(marker).map_or(raw, |(head, _)| head)
}

pub fn normalize_record(
    index: usize,
    record: &RawProductRecord,
    options: &NormalizeOptions,
) -> Result<CleanedRow, NormalizeError> {
    let weight = record
        .weight
        .as_deref()
        .ok_or(NormalizeError::MissingField {
            index,
            field: "weight",
        })?;
    let length = record
        .length
        .as_deref()
        .ok_or(NormalizeError::MissingField {
            index,
            field: "length",
        })?;

    let parsed = parse_weight(weight, &options.weight_suffix).map_err(|source| {
        NormalizeError::InvalidWeight {
            index,
            raw: weight.to_string(),
            source,
        }
    })?;

    Ok(CleanedRow {
        name: join_lines(&record.name),
        blend: record.blend.clone().unwrap_or_default(),
        weight: parsed * options.weight_factor,
        price: record.price.clone().unwrap_or_default(),
        length: before_marker(length, &options.length_marker).to_string(),
    })
}

/// Every row is built before the output is opened, so a bad record leaves no
/// CSV behind.
pub fn normalize_all(
    records: &[RawProductRecord],
    options: &NormalizeOptions,
) -> Result<Vec<CleanedRow>, NormalizeError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| normalize_record(i, record, options))
        .collect()
}

pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[CleanedRow]) -> Result<(), NormalizeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CleanedRow::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads the scraped JSON at `input` and writes the cleaned CSV to `output`.
pub fn load_to_csv<P, Q>(input: P, output: Q, options: &NormalizeOptions) -> Result<usize, NormalizeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());

    let records: Vec<RawProductRecord> =
        serde_json::from_reader(BufReader::new(File::open(input)?))?;
    debug!("Loaded {} records from {}", records.len(), input.display());

    let rows = normalize_all(&records, options)?;
    write_csv(output, &rows)?;

    info!("Wrote {} rows to {}", rows.len(), output.display());
    Ok(rows.len())
}
