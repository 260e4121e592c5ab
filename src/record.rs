use csv::StringRecord;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Name of the field the aggregator derives for every record.
pub const GROSS_SALARY: &str = "Gross Salary";

/// Renders an amount the way it is written to the report.
pub fn render_amount(amount: Decimal) -> String {
    amount.round_dp(4).to_string()
}

/// One payroll line: the values of a data row keyed by the header of the file it came from,
/// plus the gross salary once the aggregator has derived it.
#[derive(Debug, Clone)]
pub struct Record {
    headers: Arc<StringRecord>,
    values: StringRecord,
    gross_salary: Option<Decimal>,
}

impl Record {
    pub fn new(headers: Arc<StringRecord>, values: StringRecord) -> Self {
        Record {
            headers,
            values,
            gross_salary: None,
        }
    }

    /// Builds a standalone record from `(field, value)` pairs, in order.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let headers: StringRecord = pairs.iter().map(|(name, _)| *name).collect();
        let values: StringRecord = pairs.iter().map(|(_, value)| *value).collect();
        Record::new(Arc::new(headers), values)
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn values(&self) -> &StringRecord {
        &self.values
    }

    /// Value of an original field, `None` when the file has no such column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|header| header == name)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn gross_salary(&self) -> Option<Decimal> {
        self.gross_salary
    }

    pub fn set_gross_salary(&mut self, amount: Decimal) {
        self.gross_salary = Some(amount);
    }

    /// Field names in output order: original header first, derived field last.
    ///
    /// A source column already called `Gross Salary` keeps its position and is shadowed by
    /// the derived value.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.headers.iter().map(String::from).collect();
        if self.gross_salary.is_some() && !names.iter().any(|name| name == GROSS_SALARY) {
            names.push(GROSS_SALARY.to_string());
        }
        names
    }

    /// Rendered value of any field, derived or original.
    pub fn value(&self, name: &str) -> Option<String> {
        match self.gross_salary {
            Some(amount) if name == GROSS_SALARY => Some(render_amount(amount)),
            _ => self.get(name).map(String::from),
        }
    }
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[test]
fn lookup_by_header() {
    let record = Record::from_pairs(&[("id", "7"), ("basic_salary", "1000")]);
    assert_eq!(record.get("basic_salary"), Some("1000"));
    assert_eq!(record.get("allowances"), None);
    assert_eq!(record.get_or("allowances", "0"), "0");
}

#[test]
fn derived_field_is_appended() {
    let mut record = Record::from_pairs(&[("id", "7"), ("basic_salary", "1000")]);
    assert_eq!(record.field_names(), vec!["id", "basic_salary"]);

    record.set_gross_salary(dec!(1200));
    assert_eq!(record.field_names(), vec!["id", "basic_salary", GROSS_SALARY]);
    assert_eq!(record.value(GROSS_SALARY), Some("1200".to_string()));
    assert_eq!(record.value("id"), Some("7".to_string()));
}

#[test]
fn derived_field_shadows_source_column() {
    let mut record = Record::from_pairs(&[("Gross Salary", "1"), ("name", "ann")]);
    record.set_gross_salary(dec!(5));
    assert_eq!(record.field_names(), vec![GROSS_SALARY, "name"]);
    assert_eq!(record.value(GROSS_SALARY), Some("5".to_string()));
}

#[test]
fn amounts_render_with_four_places_at_most() {
    assert_eq!(render_amount(dec!(1400)), "1400");
    assert_eq!(render_amount(dec!(1200.50)), "1200.50");
    assert_eq!(render_amount(dec!(1000) / dec!(3)), "333.3333");
}
