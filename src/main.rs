use paymaster::{render_amount, run, ReportConfig};
use rust_decimal::Decimal;

fn show(amount: Option<Decimal>) -> String {
    amount.map(render_amount).unwrap_or_else(|| "None".to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let outcome = run(&ReportConfig::default());
    let summary = &outcome.summary;

    println!("Second Highest Salary: {}", show(summary.second_highest));
    println!("Average Salary: {}", show(summary.average));
    println!("Highest Salary: {}", show(summary.highest));
    println!(
        "Highest Salary Count: {}",
        summary
            .highest_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| "None".to_string())
    );

    if !outcome.written {
        std::process::exit(1);
    }
}
