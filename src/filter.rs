use log::debug;

use crate::structs::{FilterOptions, Package, Vulnerability};

fn type_matches(types: &[String], package_type: &str) -> bool {
    types.iter().any(|t| t.eq_ignore_ascii_case(package_type))
}

fn keep_vulnerability(options: &FilterOptions, vuln: &Vulnerability) -> bool {
    if let Some(min) = options.min_severity {
        // Unrecognized severities never satisfy a minimum.
        if !vuln.severity().is_some_and(|severity| severity >= min) {
            return false;
        }
    }
    if options.exclude_accepted && !vuln.accepted_risks.is_empty() {
        debug!(
            "{}: skipping, {} accepted risk(s)",
            vuln.name,
            vuln.accepted_risks.len()
        );
        return false;
    }
    true
}

/// Applies type and vulnerability filters, preserving order. Packages left
/// without vulnerabilities are dropped; packages that never had a `vulns`
/// key are kept.
pub fn filter_packages(packages: Vec<Package>, options: &FilterOptions) -> Vec<Package> {
    if options.is_empty() {
        return packages;
    }
    packages
        .into_iter()
        .filter(|package| {
            options.package_types.is_empty()
                || type_matches(&options.package_types, &package.package_type)
        })
        .filter(|package| !type_matches(&options.not_package_types, &package.package_type))
        .filter_map(|mut package| {
            let Some(vulns) = package.vulns.take() else {
                return Some(package);
            };
            let kept: Vec<Vulnerability> = vulns
                .into_iter()
                .filter(|vuln| keep_vulnerability(options, vuln))
                .collect();
            if kept.is_empty() {
                debug!("Package: {} has no vulnerabilities left after filtering", package.name);
                None
            } else {
                package.vulns = Some(kept);
                Some(package)
            }
        })
        .collect()
}
