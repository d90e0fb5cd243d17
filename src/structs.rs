use serde::Deserialize;
use serde_json::Number;

use crate::enums::Severity;
use crate::utils::serde::{deserialize_bool_like, deserialize_null_as_empty};

/// A `sysdig-cli-scanner` JSON report.
#[derive(Clone, Debug, Deserialize)]
pub struct ScanReport {
    pub scanner: Scanner,
    pub info: Info,
    pub result: ScanResult,
}

impl ScanReport {
    /// `info.resultUrl` up to (not including) its last `/`.
    pub fn base_url(&self) -> &str {
        let url = &self.info.result_url;
        match url.rfind('/') {
            Some(idx) => &url[..idx],
            None => url,
        }
    }

    pub fn pull_string(&self) -> &str {
        &self.result.metadata.pull_string
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scanner {
    pub version: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub result_url: String,
    pub result_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScanResult {
    pub metadata: Metadata,
    pub packages: Vec<Package>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub pull_string: String,
    pub digest: String,
    pub image_id: String,
    pub architecture: String,
    pub base_os: String,
    pub os: String,
    pub size: u64,
    pub layers_count: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub package_type: String,
    pub path: String,
    #[serde(default)]
    pub suggested_fix: Option<String>,
    /// `None` when the report has no `vulns` key for this package.
    #[serde(default)]
    pub vulns: Option<Vec<Vulnerability>>,
}

impl Package {
    pub fn coordinates(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub name: String,
    pub severity: SeverityValue,
    pub cvss_score: CvssScore,
    #[serde(default)]
    pub fixed_in_version: Option<String>,
    #[serde(deserialize_with = "deserialize_bool_like")]
    pub exploitable: bool,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub accepted_risks: Vec<serde_json::Value>,
}

impl Vulnerability {
    pub fn severity(&self) -> Option<Severity> {
        Severity::parse(&self.severity.value)
    }

    pub fn fixed_version(&self) -> &str {
        self.fixed_in_version.as_deref().unwrap_or_default()
    }

    pub fn cvss(&self) -> &CvssValue {
        &self.cvss_score.value
    }

    pub fn nvd_url(&self) -> String {
        format!("https://nvd.nist.gov/vuln/detail/{}", self.name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeverityValue {
    pub value: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CvssScore {
    pub value: CvssValue,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CvssValue {
    pub score: Number,
    pub version: String,
    pub vector: String,
}

/// Package and vulnerability selection applied before conversion.
#[derive(Clone, Debug, Default)]
pub struct FilterOptions {
    pub min_severity: Option<Severity>,
    pub package_types: Vec<String>,
    pub not_package_types: Vec<String>,
    pub exclude_accepted: bool,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.min_severity.is_none()
            && self.package_types.is_empty()
            && self.not_package_types.is_empty()
            && !self.exclude_accepted
    }
}

#[derive(Clone, Debug, Default)]
pub struct TransformConfig {
    pub group_by_package: bool,
    pub filter: FilterOptions,
}
