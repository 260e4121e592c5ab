use paymaster::{run, ReportConfig, GROSS_SALARY, SUMMARY_COLUMNS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const HEADER: &str = "id\tname\tbasic_salary\tallowances\n";

fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read_report(path: &Path) -> Vec<csv::StringRecord> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap()
        .records()
        .map(Result::unwrap)
        .collect()
}

fn amount(field: &str) -> Decimal {
    Decimal::from_str(field).unwrap()
}

#[test]
fn two_files_into_one_report() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_input(dir.path(), "data.dat", &format!("{}1\tann\t1000\t200\n", HEADER));
    let second = write_input(dir.path(), "data1.dat", &format!("{}2\tbob\t1500\t100\n", HEADER));
    let output = dir.path().join("output").join("result.csv");

    let outcome = run(&ReportConfig::new(vec![first, second], output.clone()));

    assert!(outcome.written);
    assert_eq!(outcome.summary.second_highest, Some(dec!(1200)));
    assert_eq!(outcome.summary.average, Some(dec!(1400)));
    assert_eq!(outcome.summary.highest, Some(dec!(1600)));
    assert_eq!(outcome.summary.highest_count, Some(1));

    let rows = read_report(&output);
    assert_eq!(rows.len(), 4);

    let header: Vec<&str> = rows[0].iter().collect();
    let mut expected = vec!["id", "name", "basic_salary", "allowances", GROSS_SALARY];
    expected.extend(SUMMARY_COLUMNS);
    assert_eq!(header, expected);

    assert!(rows[1].iter().take(5).all(str::is_empty));
    assert_eq!(amount(&rows[1][5]), dec!(1200));
    assert_eq!(amount(&rows[1][6]), dec!(1400));
    assert_eq!(amount(&rows[1][7]), dec!(1600));
    assert_eq!(&rows[1][8], "1");

    // data rows carry the original values untouched, highest first
    assert_eq!(rows[2].iter().take(4).collect::<Vec<_>>(), vec!["2", "bob", "1500", "100"]);
    assert_eq!(amount(&rows[2][4]), dec!(1600));
    assert_eq!(rows[3].iter().take(4).collect::<Vec<_>>(), vec!["1", "ann", "1000", "200"]);
    assert_eq!(amount(&rows[3][4]), dec!(1200));
    assert!(rows[3].iter().skip(5).all(str::is_empty));
}

#[test]
fn missing_inputs_give_an_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");
    let config = ReportConfig::new(
        vec![dir.path().join("nope.dat"), dir.path().join("nope1.dat")],
        output.clone(),
    );

    let outcome = run(&config);

    assert!(outcome.written);
    assert_eq!(outcome.summary.second_highest, None);
    assert_eq!(outcome.summary.average, None);
    assert_eq!(outcome.summary.highest, None);
    assert_eq!(outcome.summary.highest_count, None);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Second Highest Salary,Average Salary,Highest Salary,Highest Salary Count\n,,,\n"
    );
}

#[test]
fn bad_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_input(dir.path(), "good.dat", &format!("{}1\tann\t900\t100\n", HEADER));
    let ragged = write_input(dir.path(), "ragged.dat", &format!("{}2\tbob\n", HEADER));
    let output = dir.path().join("result.csv");

    let outcome = run(&ReportConfig::new(vec![ragged, good], output.clone()));

    assert_eq!(outcome.summary.highest, Some(dec!(1000)));
    assert_eq!(outcome.summary.second_highest, None);
    assert_eq!(read_report(&output).len(), 3);
}

#[test]
fn unparseable_salary_empties_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "data.dat",
        &format!("{}1\tann\t900\t100\n2\tbob\tplenty\t100\n", HEADER),
    );
    let output = dir.path().join("result.csv");

    let outcome = run(&ReportConfig::new(vec![input], output.clone()));

    assert!(outcome.written);
    assert_eq!(outcome.summary.highest, None);
    assert_eq!(outcome.summary.highest_count, None);
    assert_eq!(read_report(&output).len(), 2);
}

#[test]
fn missing_allowances_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "data.dat",
        "name\tbasic_salary\ncy\t1500\ndee\t2000\nel\t2000\n",
    );
    let output = dir.path().join("result.csv");

    let outcome = run(&ReportConfig::new(vec![input], output.clone()));

    assert_eq!(outcome.summary.highest, Some(dec!(2000)));
    assert_eq!(outcome.summary.highest_count, Some(2));
    assert_eq!(outcome.summary.second_highest, Some(dec!(2000)));

    let rows = read_report(&output);
    let names: Vec<&str> = rows[2..].iter().map(|row| &row[0]).collect();
    assert_eq!(names, vec!["dee", "el", "cy"]);
    assert_eq!(amount(&rows[4][2]), dec!(1500));
}

#[test]
fn write_failure_is_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "data.dat", &format!("{}1\tann\t900\t100\n", HEADER));
    let blocker = write_input(dir.path(), "blocker", "not a directory");

    let outcome = run(&ReportConfig::new(vec![input], blocker.join("result.csv")));

    assert!(!outcome.written);
    assert_eq!(outcome.summary.highest, Some(dec!(1000)));
}
