use anyhow::Result;
use tracing_subscriber::EnvFilter;

use sysreport_rs::report::{self, Report, ReportOptions, REPORT_FILENAME};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // diagnostics go to stderr; stdout carries only the report itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let report = Report::generate()?;
    let rendered = report.render(ReportOptions::default());
    println!("{rendered}");

    report::write_report(REPORT_FILENAME, &rendered)?;
    println!("\nReport saved to {REPORT_FILENAME}");

    Ok(())
}
