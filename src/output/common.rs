use crate::structs::{Package, ScanReport, Vulnerability};

pub fn package_link(base_url: &str, package_name: &str) -> String {
    format!("{base_url}/content?filter=freeText+in+(\"{package_name}\")")
}

pub fn vulnerability_link(base_url: &str, vuln_name: &str) -> String {
    format!("{base_url}/vulnerabilities?filter=freeText+in+(\"{vuln_name}\")")
}

fn nvd_markdown_link(vuln: &Vulnerability) -> String {
    format!("[{}]({})", vuln.name, vuln.nvd_url())
}

/// `{vuln} - {package}@{version}`, used for both rule descriptions.
pub fn rule_description(vuln: &Vulnerability, package: &Package) -> String {
    format!("{} - {}", vuln.name, package.coordinates())
}

pub fn rule_help_text(vuln: &Vulnerability, package: &Package) -> String {
    let cvss = vuln.cvss();
    [
        format!("Vulnerability {}", vuln.name),
        format!("Package: {}", package.name),
        format!("Severity: {}", vuln.severity.value),
        format!("CVSS Score: {}", cvss.score),
        format!("CVSS Version: {}", cvss.version),
        format!("CVSS Vector: {}", cvss.vector),
        format!("Fixed Version: {}", vuln.fixed_version()),
        format!("Exploitable: {}", vuln.exploitable),
        format!("Link: {}", nvd_markdown_link(vuln)),
    ]
    .join("\n")
}

const HELP_TABLE_HEADER: &str = "| Package | Severity | CVSS Score | CVSS Version | CVSS Vector | Fixed Version | Exploitable | Link |\n\
                                 | --- | --- | --- | --- | --- | --- | --- | --- |";

fn help_table_row(vuln: &Vulnerability, package: &Package) -> String {
    let cvss = vuln.cvss();
    format!(
        "|{}|{}|{}|{}|{}|{}|{}|{}|",
        package.name,
        vuln.severity.value,
        cvss.score,
        cvss.version,
        cvss.vector,
        vuln.fixed_version(),
        vuln.exploitable,
        nvd_markdown_link(vuln),
    )
}

pub fn rule_help_markdown(vuln: &Vulnerability, package: &Package) -> String {
    format!(
        "**Vulnerability {}**\n{}\n{}",
        vuln.name,
        HELP_TABLE_HEADER,
        help_table_row(vuln, package)
    )
}

pub fn result_message(report: &ScanReport, package: &Package, vuln: &Vulnerability) -> String {
    let base_url = report.base_url();
    let cvss = vuln.cvss();
    [
        format!(
            "Full image scan results in Sysdig UI: [{} scan result]({})",
            report.pull_string(),
            report.info.result_url
        ),
        format!("Package: [{}]({})", package.name, package_link(base_url, &package.name)),
        format!("Package type: {}", package.package_type),
        format!("Installed Version: {}", package.version),
        format!("Package path: {}", package.path),
        format!("Vulnerability: [{}]({})", vuln.name, vulnerability_link(base_url, &vuln.name)),
        format!("Severity: {}", vuln.severity.value),
        format!("CVSS Score: {}", cvss.score),
        format!("CVSS Version: {}", cvss.version),
        format!("CVSS Vector: {}", cvss.vector),
        format!("Fixed Version: {}", vuln.fixed_version()),
        format!("Exploitable: {}", vuln.exploitable),
        format!("Link to NVD: {}", nvd_markdown_link(vuln)),
    ]
    .join("\n")
}

pub fn location_message(report: &ScanReport, package: &Package) -> String {
    format!("{} - {}", report.pull_string(), package.coordinates())
}

// Per-package grouping

pub fn package_short_description(package: &Package) -> String {
    format!("Vulnerable package: {}", package.name)
}

fn package_vuln_block(package: &Package, vuln: &Vulnerability) -> String {
    format!(
        "{}\nSeverity: {}\nPackage: {}\nType: {}\nFix: {}\nURL: {}",
        vuln.name,
        vuln.severity.value,
        package.name,
        package.package_type,
        package.suggested_fix.as_deref().unwrap_or_default(),
        vuln.nvd_url()
    )
}

pub fn package_full_description(package: &Package, vulns: &[Vulnerability]) -> String {
    vulns
        .iter()
        .map(|vuln| package_vuln_block(package, vuln))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn package_help_text(package: &Package, vulns: &[Vulnerability]) -> String {
    vulns
        .iter()
        .map(|vuln| rule_help_text(vuln, package))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn package_help_markdown(package: &Package, vulns: &[Vulnerability]) -> String {
    let rows = vulns
        .iter()
        .map(|vuln| help_table_row(vuln, package))
        .collect::<Vec<_>>()
        .join("\n");
    format!("**Vulnerable package {}**\n{}\n{}", package.coordinates(), HELP_TABLE_HEADER, rows)
}

pub fn package_message(report: &ScanReport, package: &Package, vulns: &[Vulnerability]) -> String {
    let base_url = report.base_url();
    let mut lines = vec![
        format!("Vulnerabilities found in package {}", package.name),
        format!(
            "Full image scan results in Sysdig UI: [{} scan result]({})",
            report.pull_string(),
            report.info.result_url
        ),
        format!("Package: [{}]({})", package.name, package_link(base_url, &package.name)),
        format!("Package type: {}", package.package_type),
        format!("Installed Version: {}", package.version),
        format!("Package path: {}", package.path),
    ];
    lines.extend(vulns.iter().map(|vuln| {
        format!(
            "Vulnerability: [{}]({}) Severity: {} CVSS Score: {} Fixed Version: {}",
            vuln.name,
            vulnerability_link(base_url, &vuln.name),
            vuln.severity.value,
            vuln.cvss().score,
            vuln.fixed_version()
        )
    }));
    lines.join("\n")
}
