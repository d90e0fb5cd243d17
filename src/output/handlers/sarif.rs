use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::error::ConvertError;
use crate::output::sarif::SarifReport;

fn write_sarif<W: Write>(mut writer: W, report: &SarifReport, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writeln!(writer)?;
    writer.flush()
}

/// Writes the SARIF document to `output_filename`, or to stdout when unset.
pub fn export_sarif(report: &SarifReport, output_filename: Option<&Path>, pretty: bool) -> Result<()> {
    match output_filename {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConvertError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            write_sarif(BufWriter::new(file), report, pretty).map_err(|source| {
                ConvertError::Write {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            info!("SARIF written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_sarif(stdout.lock(), report, pretty)?;
        }
    }
    Ok(())
}
