use crate::CheckError;
use serde_json::{Map, Value};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};
use tracing::{info, warn};

pub type JsonRecord = Map<String, Value>;

/// Records holding at least one empty-string value, in input order.
pub fn find_incomplete(records: &[JsonRecord]) -> Vec<&JsonRecord> {
    records
        .iter()
        .filter(|record| record.values().any(|v| v.as_str() == Some("")))
        .collect()
}

/// Pretty-prints every incomplete record in `path` to `out` and returns how
/// many there were. The file itself is left untouched.
pub fn check_for_missing<P, W>(path: P, mut out: W) -> Result<usize, CheckError>
where
    P: AsRef<Path>,
    W: Write,
{
    let path = path.as_ref();
    let records: Vec<JsonRecord> = serde_json::from_reader(BufReader::new(File::open(path)?))?;

    let incomplete = find_incomplete(&records);
    for record in &incomplete {
        let link = record
            .get("link")
            .and_then(Value::as_str)
            .unwrap_or("<no link>");
        warn!("Incomplete record: {}", link);
        serde_json::to_writer_pretty(&mut out, record)?;
        writeln!(out)?;
    }

    info!(
        "{} of {} records in {} are incomplete",
        incomplete.len(),
        records.len(),
        path.display()
    );
    Ok(incomplete.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn records(json: &str) -> Vec<JsonRecord> {
        serde_json::from_str(json).expect("Valid JSON")
    }

    #[test]
    fn test_empty_price_is_reported() {
        let r = records(
            r#"[{"link":"a","name":"Alpaca","blend":"100% Alpaca","weight":"1.76oz","price":"","length":"110yds"}]"#,
        );
        assert_eq!(find_incomplete(&r).len(), 1);
    }

    #[test]
    fn test_complete_records_are_not_reported() {
        let r = records(
            r#"[
                {"link":"a","name":"Alpaca","blend":"100% Alpaca","weight":"1.76oz","price":"$4","length":"110yds"},
                {"link":"b","name":"Linen","blend":null,"weight":"50","price":"$6","length":null}
            ]"#,
        );
        assert!(find_incomplete(&r).is_empty());
    }

    #[test]
    fn test_reports_every_incomplete_record() {
        let dir = tempfile::tempdir().expect("Temp dir");
        let path = dir.path().join("products.json");
        let json = r#"[
            {"link":"a","name":"","price":"$1"},
            {"link":"b","name":"Silk","price":"$2"},
            {"link":"c","name":"Mohair","price":""}
        ]"#;
        fs::write(&path, json).expect("Writable temp file");

        let mut out = Vec::new();
        let count = check_for_missing(&path, &mut out).expect("Readable input");
        assert_eq!(count, 2);

        let printed = String::from_utf8(out).expect("UTF-8 output");
        assert!(printed.contains(r#""link": "a""#));
        assert!(!printed.contains(r#""link": "b""#));
        assert!(printed.contains(r#""link": "c""#));

        assert_eq!(fs::read_to_string(&path).expect("Readable input"), json);
    }

    #[test]
    fn test_missing_file() {
        let res = check_for_missing("does/not/exist.json", Vec::new());
        assert!(matches!(res, Err(CheckError::Io(_))));
    }
}
