//! SARIF 2.1.0 model and the conversion from a scanner report.

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;

use crate::enums::{SarifLevel, Severity};
use crate::filter::filter_packages;
use crate::output::common::{
    location_message, package_full_description, package_help_markdown, package_help_text,
    package_message, package_short_description, result_message, rule_description,
    rule_help_markdown, rule_help_text,
};
use crate::structs::{Package, ScanReport, TransformConfig, Vulnerability};

pub const SARIF_VERSION: &str = "2.1.0";
pub const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";

const DRIVER_NAME: &str = "sysdig-cli-scanner";
const DRIVER_FULL_NAME: &str = "Sysdig Vulnerability CLI Scanner";
const DRIVER_INFORMATION_URI: &str =
    "https://docs.sysdig.com/en/docs/installation/sysdig-secure/install-vulnerability-cli-scanner";
const URI_BASE_ID: &str = "ROOTPATH";
const PRECISION: &str = "very-high";
const COLUMN_KIND: &str = "utf16CodeUnits";

#[derive(Debug, Clone, Serialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
    pub column_kind: String,
    pub properties: RunProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifDriver {
    pub full_name: String,
    pub information_uri: String,
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    pub short_description: SarifMessage,
    pub full_description: SarifMessage,
    pub default_configuration: SarifRuleConfiguration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_uri: Option<String>,
    pub help: SarifHelp,
    pub properties: RuleProperties,
}

/// `level` is left out for severities outside the scanner vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct SarifRuleConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SarifLevel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SarifHelp {
    pub text: String,
    pub markdown: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleProperties {
    pub precision: String,
    #[serde(rename = "security-severity")]
    pub security_severity: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SarifLevel>,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
    pub message: SarifMessage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifArtifactLocation {
    pub uri: String,
    pub uri_base_id: String,
}

/// Image metadata copied onto the run, every value rendered as a string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProperties {
    pub pull_string: String,
    pub digest: String,
    pub image_id: String,
    pub architecture: String,
    pub base_os: String,
    pub os: String,
    pub size: String,
    pub layers_count: String,
    pub result_url: String,
    pub result_id: String,
}

impl SarifMessage {
    fn new(text: impl Into<String>) -> Self {
        SarifMessage { text: text.into() }
    }
}

/// Maps a raw `severity.value` to a SARIF level.
pub fn check_level(severity: &str) -> Option<SarifLevel> {
    Severity::parse(severity).map(SarifLevel::from)
}

fn tags(severity: &str) -> Vec<String> {
    vec!["vulnerability".to_string(), "security".to_string(), severity.to_string()]
}

fn image_location(report: &ScanReport, package: &Package) -> SarifLocation {
    SarifLocation {
        physical_location: SarifPhysicalLocation {
            artifact_location: SarifArtifactLocation {
                uri: report.pull_string().to_string(),
                uri_base_id: URI_BASE_ID.to_string(),
            },
        },
        message: SarifMessage::new(location_message(report, package)),
    }
}

fn build_rule(package: &Package, vuln: &Vulnerability) -> SarifRule {
    let level = check_level(&vuln.severity.value);
    if level.is_none() {
        warn!(
            "{}: unrecognized severity {:?} (expected one of {}), no SARIF level assigned",
            vuln.name,
            vuln.severity.value,
            Severity::vocabulary()
        );
    }
    let description = rule_description(vuln, package);
    SarifRule {
        id: vuln.name.clone(),
        name: package.package_type.clone(),
        short_description: SarifMessage::new(description.clone()),
        full_description: SarifMessage::new(description),
        default_configuration: SarifRuleConfiguration { level },
        help_uri: Some(vuln.nvd_url()),
        help: SarifHelp {
            text: rule_help_text(vuln, package),
            markdown: rule_help_markdown(vuln, package),
        },
        properties: RuleProperties {
            precision: PRECISION.to_string(),
            security_severity: vuln.cvss().score.to_string(),
            tags: tags(&vuln.severity.value),
        },
    }
}

fn build_result(report: &ScanReport, package: &Package, vuln: &Vulnerability) -> SarifResult {
    SarifResult {
        rule_id: vuln.name.clone(),
        level: check_level(&vuln.severity.value),
        message: SarifMessage::new(result_message(report, package, vuln)),
        locations: vec![image_location(report, package)],
    }
}

fn build_run(report: &ScanReport, rules: Vec<SarifRule>, results: Vec<SarifResult>) -> SarifReport {
    let metadata = &report.result.metadata;
    let run = SarifRun {
        tool: SarifTool {
            driver: SarifDriver {
                full_name: DRIVER_FULL_NAME.to_string(),
                information_uri: DRIVER_INFORMATION_URI.to_string(),
                name: DRIVER_NAME.to_string(),
                version: report.scanner.version.clone(),
                rules,
            },
        },
        results,
        column_kind: COLUMN_KIND.to_string(),
        properties: RunProperties {
            pull_string: metadata.pull_string.clone(),
            digest: metadata.digest.clone(),
            image_id: metadata.image_id.clone(),
            architecture: metadata.architecture.clone(),
            base_os: metadata.base_os.clone(),
            os: metadata.os.clone(),
            size: metadata.size.to_string(),
            layers_count: metadata.layers_count.to_string(),
            result_url: report.info.result_url.clone(),
            result_id: report.info.result_id.clone(),
        },
    };
    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![run],
    }
}

/// Converts a report into a single-run SARIF document: one rule per distinct
/// vulnerability name (first package wins) and one result per package and
/// vulnerability pair, both in report order.
pub fn transform(report: &ScanReport) -> SarifReport {
    let mut rules: IndexMap<&str, SarifRule> = IndexMap::new();
    let mut results = Vec::new();

    for package in &report.result.packages {
        let Some(vulns) = &package.vulns else {
            info!("Package: {} has no vulnerabilities...skipping...", package.name);
            continue;
        };
        for vuln in vulns {
            if !rules.contains_key(vuln.name.as_str()) {
                rules.insert(vuln.name.as_str(), build_rule(package, vuln));
            } else {
                debug!("{}: rule already defined, reusing for {}", vuln.name, package.coordinates());
            }
            results.push(build_result(report, package, vuln));
        }
    }

    debug!("Collected {} rules and {} results", rules.len(), results.len());
    build_run(report, rules.into_values().collect(), results)
}

fn highest_severity(vulns: &[Vulnerability]) -> Option<Severity> {
    vulns.iter().filter_map(Vulnerability::severity).max()
}

fn highest_score(vulns: &[Vulnerability]) -> Option<&serde_json::Number> {
    vulns
        .iter()
        .map(|vuln| &vuln.cvss().score)
        .max_by(|a, b| {
            let (a, b) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
            a.total_cmp(&b)
        })
}

/// Converts a report into one rule and one result per vulnerable package.
pub fn transform_by_package(report: &ScanReport) -> SarifReport {
    let mut rules = Vec::new();
    let mut results = Vec::new();

    for package in &report.result.packages {
        let Some(vulns) = &package.vulns else {
            info!("Package: {} has no vulnerabilities...skipping...", package.name);
            continue;
        };
        if vulns.is_empty() {
            continue;
        }
        let severity = highest_severity(vulns);
        let level = severity.map(SarifLevel::from);
        let severity_tag = match severity {
            Some(severity) => severity.to_string(),
            None => vulns[0].severity.value.clone(),
        };
        if level.is_none() {
            warn!("Package: {} has no recognized severity, no SARIF level assigned", package.name);
        }

        rules.push(SarifRule {
            id: package.name.clone(),
            name: package.name.clone(),
            short_description: SarifMessage::new(package_short_description(package)),
            full_description: SarifMessage::new(package_full_description(package, vulns)),
            default_configuration: SarifRuleConfiguration { level },
            help_uri: None,
            help: SarifHelp {
                text: package_help_text(package, vulns),
                markdown: package_help_markdown(package, vulns),
            },
            properties: RuleProperties {
                precision: PRECISION.to_string(),
                security_severity: highest_score(vulns)
                    .map(|score| score.to_string())
                    .unwrap_or_default(),
                tags: tags(&severity_tag),
            },
        });
        results.push(SarifResult {
            rule_id: package.name.clone(),
            level,
            message: SarifMessage::new(package_message(report, package, vulns)),
            locations: vec![image_location(report, package)],
        });
    }

    debug!("Collected {} package rules", rules.len());
    build_run(report, rules, results)
}

/// Filters the report's packages and converts it in the configured mode.
pub fn generate_sarif_output(mut report: ScanReport, config: &TransformConfig) -> SarifReport {
    let packages = std::mem::take(&mut report.result.packages);
    report.result.packages = filter_packages(packages, &config.filter);
    if config.group_by_package {
        transform_by_package(&report)
    } else {
        transform(&report)
    }
}
