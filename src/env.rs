use std::path::PathBuf;

use colored::Colorize;

use crate::enums::LogLevel;
use crate::{env_str, print_warn};

pub const LOG_LEVEL_VAR: &str = "SYSDIG_SARIF_LOG_LEVEL";
pub const LOG_FILE_VAR: &str = "SYSDIG_SARIF_LOG_FILE";

#[derive(Debug, Default)]
pub struct Environment {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

pub fn load_env() -> Environment {
    Environment {
        log_level: match env_str!(LOG_LEVEL_VAR).as_str() {
            "" => None,
            value => match value.parse::<LogLevel>() {
                Ok(level) => Some(level),
                Err(_) => {
                    print_warn!("Ignoring {LOG_LEVEL_VAR}={value}: expected INFO or DEBUG");
                    None
                }
            },
        },
        log_file: match env_str!(LOG_FILE_VAR).as_str() {
            "" => None,
            value => Some(PathBuf::from(value)),
        },
    }
}
