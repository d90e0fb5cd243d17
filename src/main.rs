use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::{debug, info};

use crate::enums::{LogLevel, Severity};
use crate::env::Environment;
use crate::logger::init_logger;
use crate::output::handlers::sarif::export_sarif;
use crate::output::sarif::generate_sarif_output;
use crate::structs::{FilterOptions, TransformConfig};
use crate::utils::file::load_report;

mod enums;
mod env;
mod error;
mod filter;
mod logger;
mod macros;
mod output;
mod structs;
mod utils;

#[derive(Debug, Parser)]
#[command(
    name = "sysdig-sarif",
    version,
    about = "Convert Sysdig report to SARIF format."
)]
struct Cli {
    /// Sysdig report file in JSON format
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,
    /// Set log level [default: INFO]
    #[arg(long, value_enum, ignore_case = true)]
    log_level: Option<LogLevel>,
    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Write SARIF to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    output_filename: Option<PathBuf>,
    /// Indent the SARIF output
    #[arg(long)]
    pretty: bool,
    /// Emit one rule per vulnerable package instead of one per vulnerability
    #[arg(long)]
    group_by_package: bool,
    /// Drop vulnerabilities below this severity
    #[arg(long, value_enum, ignore_case = true, value_name = "SEVERITY")]
    min_severity: Option<Severity>,
    /// Only keep packages of these types (comma-separated, e.g. os,java)
    #[arg(long = "type", value_name = "TYPE", value_delimiter = ',')]
    package_types: Vec<String>,
    /// Drop packages of these types (comma-separated)
    #[arg(long = "not-type", value_name = "TYPE", value_delimiter = ',')]
    not_package_types: Vec<String>,
    /// Drop vulnerabilities that have accepted risks
    #[arg(long)]
    exclude_accepted: bool,
}

fn clean_types(types: &[String]) -> Vec<String> {
    types
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

impl Cli {
    fn transform_config(&self) -> Result<TransformConfig> {
        let package_types = clean_types(&self.package_types);
        let not_package_types = clean_types(&self.not_package_types);
        if let Some(conflict) = package_types
            .iter()
            .find(|t| not_package_types.iter().any(|n| n.eq_ignore_ascii_case(t)))
        {
            return Err(err!("Package type '{conflict}' is both included and excluded"));
        }
        Ok(TransformConfig {
            group_by_package: self.group_by_package,
            filter: FilterOptions {
                min_severity: self.min_severity,
                package_types,
                not_package_types,
                exclude_accepted: self.exclude_accepted,
            },
        })
    }
}

fn convert(cli: &Cli, env: &Environment) -> Result<()> {
    let log_level = cli.log_level.or(env.log_level).unwrap_or(LogLevel::Info);
    let log_file = cli.log_file.as_deref().or(env.log_file.as_deref());
    init_logger(log_level, log_file)?;

    let config = cli.transform_config()?;
    debug!("{:?}", config);

    let report = load_report(&cli.filename)?;
    let sarif = generate_sarif_output(report, &config);
    if let Some(run) = sarif.runs.first() {
        info!(
            "Converted {} findings across {} rules.",
            run.results.len(),
            run.tool.driver.rules.len()
        );
    }
    export_sarif(&sarif, cli.output_filename.as_deref(), cli.pretty)
}

fn main() -> Result<()> {
    let env = env::load_env();
    let cli = Cli::parse();

    match convert(&cli, &env) {
        Ok(_) => Ok(()),
        Err(err) => {
            print_err!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
