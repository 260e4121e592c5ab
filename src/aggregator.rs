use crate::error::{PayrollError, Result};
use crate::record::Record;
use log::{error, info};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Batch-wide statistics over gross salaries. Every value is absent when it is undefined for the
/// batch (no records, or fewer than two for the runner-up).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub second_highest: Option<Decimal>,
    pub average: Option<Decimal>,
    pub highest: Option<Decimal>,
    pub highest_count: Option<usize>,
}

/// Records enriched with their gross salary, in input order, along with the batch summary.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub records: Vec<Record>,
    pub summary: Summary,
}

impl Aggregate {
    pub fn empty() -> Self {
        Aggregate::default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct SalaryFields {
    #[serde(default)]
    basic_salary: Option<String>,
    #[serde(default)]
    allowances: Option<String>,
}

/// Absent or blank amounts count as zero; anything else has to be a number.
fn parse_amount(field: &str, value: Option<&str>) -> Result<Decimal> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(Decimal::ZERO),
        Some(value) => value,
    };
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| PayrollError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn gross_salary(record: &Record) -> Result<Decimal> {
    let fields: SalaryFields = record.values().deserialize(Some(record.headers()))?;
    let basic_salary = parse_amount("basic_salary", fields.basic_salary.as_deref())?;
    let allowances = parse_amount("allowances", fields.allowances.as_deref())?;
    basic_salary
        .checked_add(allowances)
        .ok_or(PayrollError::Overflow("gross salary"))
}

pub fn summarize(gross_salaries: &[Decimal]) -> Result<Summary> {
    let mut sorted = gross_salaries.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));

    let highest = sorted.first().copied();
    let average = if gross_salaries.is_empty() {
        None
    } else {
        let total = gross_salaries
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
            .ok_or(PayrollError::Overflow("average salary"))?;
        Some(total / Decimal::from(gross_salaries.len() as u64))
    };

    Ok(Summary {
        second_highest: sorted.get(1).copied(),
        average,
        highest,
        highest_count: highest
            .map(|max| gross_salaries.iter().filter(|amount| **amount == max).count()),
    })
}

/// Derives `Gross Salary` for every record and summarizes the batch.
///
/// Fails as a whole on the first record whose salary figures can't be read.
pub fn aggregate(mut records: Vec<Record>) -> Result<Aggregate> {
    let mut gross_salaries = Vec::with_capacity(records.len());
    for record in records.iter_mut() {
        let gross = gross_salary(record)?;
        record.set_gross_salary(gross);
        gross_salaries.push(gross);
    }
    let summary = summarize(&gross_salaries)?;
    Ok(Aggregate { records, summary })
}

/// Like [`aggregate`], but a failed batch is logged and comes back empty.
pub fn process_data(records: Vec<Record>) -> Aggregate {
    match aggregate(records) {
        Ok(aggregate) => {
            info!("Data processing completed successfully");
            aggregate
        }
        Err(err) => {
            error!("Error processing data: {}", err);
            Aggregate::empty()
        }
    }
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
fn employee(basic_salary: &str, allowances: &str) -> Record {
    Record::from_pairs(&[
        ("name", "someone"),
        ("basic_salary", basic_salary),
        ("allowances", allowances),
    ])
}

#[test]
fn two_records() {
    let aggregate = aggregate(vec![employee("1000", "200"), employee("1500", "100")]).unwrap();

    let gross: Vec<_> = aggregate
        .records
        .iter()
        .map(|record| record.gross_salary().unwrap())
        .collect();
    assert_eq!(gross, vec![dec!(1200), dec!(1600)]);
    assert_eq!(aggregate.summary.second_highest, Some(dec!(1200)));
    assert_eq!(aggregate.summary.average, Some(dec!(1400)));
    assert_eq!(aggregate.summary.highest, Some(dec!(1600)));
    assert_eq!(aggregate.summary.highest_count, Some(1));
}

#[test]
fn single_record() {
    let aggregate = aggregate(vec![employee("900", "50.5")]).unwrap();

    assert_eq!(aggregate.summary.second_highest, None);
    assert_eq!(aggregate.summary.average, Some(dec!(950.5)));
    assert_eq!(aggregate.summary.highest, Some(dec!(950.5)));
    assert_eq!(aggregate.summary.highest_count, Some(1));
}

#[test]
fn no_records() {
    let aggregate = aggregate(Vec::new()).unwrap();
    assert!(aggregate.records.is_empty());
    assert_eq!(aggregate.summary, Summary::default());
}

#[test]
fn tie_at_the_top() {
    let aggregate = aggregate(vec![
        employee("1000", "0"),
        employee("2000", "500"),
        employee("2500", "0"),
    ])
    .unwrap();

    assert_eq!(aggregate.summary.highest, Some(dec!(2500)));
    assert_eq!(aggregate.summary.highest_count, Some(2));
    assert_eq!(aggregate.summary.second_highest, Some(dec!(2500)));
}

#[test]
fn missing_allowances_column_counts_as_zero() {
    let record = Record::from_pairs(&[("name", "bob"), ("basic_salary", "1750")]);
    let aggregate = aggregate(vec![record]).unwrap();
    assert_eq!(aggregate.records[0].gross_salary(), Some(dec!(1750)));
}

#[test]
fn blank_amount_counts_as_zero() {
    let aggregate = aggregate(vec![employee("1000", "")]).unwrap();
    assert_eq!(aggregate.records[0].gross_salary(), Some(dec!(1000)));
}

#[test]
fn scientific_notation() {
    let aggregate = aggregate(vec![employee("1e3", " 25 ")]).unwrap();
    assert_eq!(aggregate.records[0].gross_salary(), Some(dec!(1025)));
}

#[test]
fn non_numeric_amount_fails_the_batch() {
    let records = vec![employee("1000", "200"), employee("lots", "0")];
    match aggregate(records.clone()) {
        Err(PayrollError::InvalidAmount { field, value }) => {
            assert_eq!(field, "basic_salary");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let aggregate = process_data(records);
    assert!(aggregate.records.is_empty());
    assert_eq!(aggregate.summary, Summary::default());
}

#[test]
fn average_keeps_precision() {
    let summary = summarize(&[dec!(1), dec!(1), dec!(2)]).unwrap();
    assert_eq!(summary.average, Some(dec!(4) / dec!(3)));
}
