use clap::ValueEnum;
use log::LevelFilter;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Scanner severity vocabulary, ordered from least to most severe.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Hash,
    Display,
    EnumIter,
    EnumString,
    ValueEnum,
)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    Negligible,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parses a raw `severity.value`. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<Severity>().ok()
    }

    /// Comma-separated list of every recognized severity, least severe first.
    pub fn vocabulary() -> String {
        Severity::iter()
            .map(|severity| severity.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SarifLevel {
    Error,
    Warning,
    Note,
}

impl From<Severity> for SarifLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical | Severity::High => SarifLevel::Error,
            Severity::Medium => SarifLevel::Warning,
            Severity::Low | Severity::Negligible => SarifLevel::Note,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, ValueEnum)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    #[value(name = "INFO")]
    #[strum(serialize = "INFO")]
    Info,
    #[value(name = "DEBUG")]
    #[strum(serialize = "DEBUG")]
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}
