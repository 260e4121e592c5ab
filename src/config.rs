use std::path::PathBuf;

pub const DEFAULT_INPUTS: [&str; 2] = ["data/data.dat", "data/data1.dat"];
pub const DEFAULT_OUTPUT: &str = "output/result.csv";

/// Where the payroll files are read from and where the report goes.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

impl ReportConfig {
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        ReportConfig { inputs, output }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            inputs: DEFAULT_INPUTS.iter().map(PathBuf::from).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[test]
fn default_paths() {
    let config = ReportConfig::default();
    assert_eq!(
        config.inputs,
        vec![PathBuf::from("data/data.dat"), PathBuf::from("data/data1.dat")]
    );
    assert_eq!(config.output, PathBuf::from("output/result.csv"));
}
