use crate::error::Result;
use crate::record::Record;
use csv::ReaderBuilder;
use log::{error, info};
use std::io;
use std::path::Path;
use std::sync::Arc;

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.delimiter(b'\t');
    builder
}

/// Parses tab separated rows whose first line names the fields.
pub fn read_records_from<R: io::Read>(source: R) -> Result<Vec<Record>> {
    collect_records(reader_builder().from_reader(source))
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    collect_records(reader_builder().from_path(path)?)
}

fn collect_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    let headers = Arc::new(reader.headers()?.clone());
    reader
        .records()
        .map(|row| Ok(Record::new(Arc::clone(&headers), row?)))
        .collect()
}

/// Best-effort read: a file that can't be opened or parsed contributes no records.
pub fn read_data<P: AsRef<Path>>(path: P) -> Vec<Record> {
    let path = path.as_ref();
    match read_records(path) {
        Ok(records) => {
            info!("Successfully read data from {}", path.display());
            records
        }
        Err(err) => {
            error!("Error reading data from {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

#[test]
fn parses_rows_in_file_order() {
    let input = "id\tbasic_salary\tallowances\n1\t1000\t200\n2\t1500\t100\n";
    let records = read_records_from(input.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("id"), Some("1"));
    assert_eq!(records[0].get("allowances"), Some("200"));
    assert_eq!(records[1].get("basic_salary"), Some("1500"));
    assert_eq!(records[1].gross_salary(), None);
}

#[test]
fn empty_input_has_no_records() {
    assert!(read_records_from("".as_bytes()).unwrap().is_empty());
    assert!(read_records_from("id\tbasic_salary\n".as_bytes())
        .unwrap()
        .is_empty());
}

#[test]
fn ragged_row_is_an_error() {
    let input = "id\tbasic_salary\n1\t1000\n2\n";
    assert!(read_records_from(input.as_bytes()).is_err());
}

#[test]
fn missing_file_yields_nothing() {
    let records = read_data("definitely/not/here.dat");
    assert!(records.is_empty());
}
