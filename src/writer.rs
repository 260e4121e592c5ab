use crate::aggregator::Summary;
use crate::error::Result;
use crate::record::{render_amount, Record};
use csv::WriterBuilder;
use log::{error, info};
use std::fs::{self, File};
use std::io;
use std::iter;
use std::path::Path;

pub const SUMMARY_COLUMNS: [&str; 4] = [
    "Second Highest Salary",
    "Average Salary",
    "Highest Salary",
    "Highest Salary Count",
];

fn summary_values(summary: &Summary) -> [String; 4] {
    [
        summary.second_highest.map(render_amount).unwrap_or_default(),
        summary.average.map(render_amount).unwrap_or_default(),
        summary.highest.map(render_amount).unwrap_or_default(),
        summary
            .highest_count
            .map(|count| count.to_string())
            .unwrap_or_default(),
    ]
}

fn blanks(count: usize) -> impl Iterator<Item = String> {
    iter::repeat(String::new()).take(count)
}

/// Writes the report: header, summary row, then the records by descending gross salary.
///
/// Data columns are taken from the top record; a record lacking one of them leaves it blank.
pub fn write_report_to<T: io::Write>(target: T, records: &[Record], summary: &Summary) -> Result<()> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    // stable, so equal salaries keep their input order
    sorted.sort_by(|a, b| b.gross_salary().cmp(&a.gross_salary()));

    let columns = sorted
        .first()
        .map(|record| record.field_names())
        .unwrap_or_default();

    let mut writer = WriterBuilder::new().from_writer(target);
    writer.write_record(columns.iter().map(String::as_str).chain(SUMMARY_COLUMNS))?;
    writer.write_record(blanks(columns.len()).chain(summary_values(summary)))?;
    for record in sorted {
        let row = columns
            .iter()
            .map(|column| record.value(column).unwrap_or_default());
        writer.write_record(row.chain(blanks(SUMMARY_COLUMNS.len())))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the report to `output`, creating missing parent directories first.
pub fn write_report<P: AsRef<Path>>(output: P, records: &[Record], summary: &Summary) -> Result<()> {
    let output = output.as_ref();
    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_report_to(File::create(output)?, records, summary)
}

/// Best-effort variant of [`write_report`]: failures are logged, and `false` is returned.
pub fn write_to_csv<P: AsRef<Path>>(output: P, records: &[Record], summary: &Summary) -> bool {
    let output = output.as_ref();
    match write_report(output, records, summary) {
        Ok(()) => {
            info!("Results written to {} successfully", output.display());
            true
        }
        Err(err) => {
            error!("Error writing results to {}: {}", output.display(), err);
            false
        }
    }
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
fn enriched(name: &str, gross: rust_decimal::Decimal) -> Record {
    let mut record = Record::from_pairs(&[("name", name), ("basic_salary", "0")]);
    record.set_gross_salary(gross);
    record
}

#[cfg(test)]
fn render(records: &[Record], summary: &Summary) -> String {
    let mut output = Vec::new();
    write_report_to(&mut output, records, summary).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn header_summary_then_sorted_rows() {
    let records = vec![enriched("ann", dec!(1200)), enriched("bob", dec!(1600))];
    let summary = Summary {
        second_highest: Some(dec!(1200)),
        average: Some(dec!(1400)),
        highest: Some(dec!(1600)),
        highest_count: Some(1),
    };

    assert_eq!(
        render(&records, &summary),
        "name,basic_salary,Gross Salary,Second Highest Salary,Average Salary,Highest Salary,Highest Salary Count\n\
         ,,,1200,1400,1600,1\n\
         bob,0,1600,,,,\n\
         ann,0,1200,,,,\n"
    );
}

#[test]
fn ties_keep_input_order() {
    let records = vec![
        enriched("first", dec!(10)),
        enriched("low", dec!(5)),
        enriched("second", dec!(10)),
        enriched("third", dec!(10.00)),
    ];
    let output = render(&records, &Summary::default());
    let names: Vec<&str> = output
        .lines()
        .skip(2)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second", "third", "low"]);
}

#[test]
fn no_records_only_summary_columns() {
    assert_eq!(
        render(&[], &Summary::default()),
        "Second Highest Salary,Average Salary,Highest Salary,Highest Salary Count\n,,,\n"
    );
}

#[test]
fn columns_come_from_top_record() {
    let mut other = Record::from_pairs(&[("name", "cy"), ("dept", "ops")]);
    other.set_gross_salary(dec!(1));
    let records = vec![other, enriched("dee", dec!(2))];

    let output = render(&records, &Summary::default());
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].starts_with("name,basic_salary,Gross Salary,"));
    assert_eq!(lines[2], "dee,0,2,,,,");
    assert_eq!(lines[3], "cy,,1,,,,");
}

#[test]
fn creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested").join("deeper").join("result.csv");

    assert!(write_to_csv(&output, &[enriched("ann", dec!(3))], &Summary::default()));
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("ann,0,3,,,,"));
}

#[test]
fn unwritable_target_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    // the output path is an existing directory
    assert!(!write_to_csv(dir.path(), &[], &Summary::default()));
    assert!(write_report(dir.path(), &[], &Summary::default()).is_err());
}
