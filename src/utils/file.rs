use std::fs;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::error::ConvertError;
use crate::structs::ScanReport;
use crate::utils::schema::check_required_keys;

/// Reads and validates a scanner report. Nothing is returned unless the whole
/// document matches the expected shape.
pub fn load_report(path: &Path) -> Result<ScanReport, ConvertError> {
    info!("Loading {} JSON file.", path.display());
    let raw = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", raw.len(), path.display());
    parse_report(path, &raw)
}

pub fn parse_report(path: &Path, raw: &str) -> Result<ScanReport, ConvertError> {
    let document: Value = serde_json::from_str(raw).map_err(|source| ConvertError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    check_required_keys(&document).map_err(|detail| ConvertError::Schema {
        path: path.to_path_buf(),
        detail,
    })?;
    serde_json::from_value(document).map_err(|err| ConvertError::Schema {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}
