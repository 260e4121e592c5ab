//! Payroll report: reads tab separated payroll files, derives each employee's gross salary,
//! summarizes the batch and writes a CSV report sorted by gross salary.

mod aggregator;
mod config;
mod error;
mod reader;
mod record;
mod writer;

pub use crate::aggregator::{aggregate, process_data, summarize, Aggregate, Summary};
pub use crate::config::{ReportConfig, DEFAULT_INPUTS, DEFAULT_OUTPUT};
pub use crate::error::{PayrollError, Result};
pub use crate::reader::{read_data, read_records, read_records_from};
pub use crate::record::{render_amount, Record, GROSS_SALARY};
pub use crate::writer::{write_report, write_report_to, write_to_csv, SUMMARY_COLUMNS};

use log::{info, warn};

/// What a run produced: the batch summary and whether the report reached disk.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: Summary,
    pub written: bool,
}

/// Reads every configured input, aggregates the combined records and writes the report.
///
/// Nothing here fails: unreadable inputs contribute no records, a bad batch is reported empty,
/// and a failed write is logged and flagged in the outcome.
pub fn run(config: &ReportConfig) -> RunOutcome {
    let mut all_records: Vec<Record> = Vec::new();
    for path in &config.inputs {
        let records = read_data(path);
        info!(
            "Successfully read {} entries from {}",
            records.len(),
            path.display()
        );
        if let (Some(first), Some(current)) = (all_records.first(), records.first()) {
            if first.headers() != current.headers() {
                warn!(
                    "{} has a different header than earlier input, report columns follow the top record",
                    path.display()
                );
            }
        }
        all_records.extend(records);
    }

    let Aggregate { records, summary } = process_data(all_records);
    let written = write_to_csv(&config.output, &records, &summary);
    RunOutcome { summary, written }
}
