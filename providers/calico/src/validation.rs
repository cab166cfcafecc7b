//! Configuration validation.
//!
//! Every check appends to a [`Diagnostics`] collection instead of returning
//! early, so one pass reports all problems in a configuration.

use crate::error::{Diagnostic, Diagnostics};
use crate::model::IPPoolData;
use crate::schema::{ANNOTATIONS_PATH, DEFAULT_MODE, ENCAPSULATION_MODES};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

const QUALIFIED_NAME_FMT: &str = "([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]";
const QUALIFIED_NAME_ERR_MSG: &str =
    "must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character";
const DNS1123_SUBDOMAIN_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?(\\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*";
const DNS1123_SUBDOMAIN_ERR_MSG: &str = "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character";

fn regex_error(message: &str, format: &str, examples: &[&str]) -> String {
    let mut out = format!("{message} (e.g. ");
    for (i, example) in examples.iter().enumerate() {
        if i > 0 {
            out.push_str(" or ");
        }
        out.push_str(&format!("'{example}', "));
    }
    out.push_str(&format!("regex used for validation is '{format}')"));
    out
}

fn qualified_name_regex_error() -> String {
    regex_error(QUALIFIED_NAME_ERR_MSG, QUALIFIED_NAME_FMT, &["MyName", "my.name", "123-abc"])
}

static QUALIFIED_NAME_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(&format!("^(?:{QUALIFIED_NAME_FMT})$")));
static DNS1123_SUBDOMAIN_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(&format!("^(?:{DNS1123_SUBDOMAIN_FMT})$")));

fn is_full_match(regex: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> bool {
    regex.as_ref().is_ok_and(|re| re.is_match(value))
}

/// DNS-1123 subdomain check; returns every violation
pub fn is_dns1123_subdomain(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errors.push(format!("must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"));
    }
    if !is_full_match(&DNS1123_SUBDOMAIN_REGEX, value) {
        errors.push(regex_error(DNS1123_SUBDOMAIN_ERR_MSG, DNS1123_SUBDOMAIN_FMT, &["example.com"]));
    }
    errors
}

/// Kubernetes qualified-name check (`[prefix/]name`); returns every violation
pub fn is_qualified_name(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let parts: Vec<&str> = value.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                errors.push("prefix part must be non-empty".to_string());
            } else {
                errors.extend(
                    is_dns1123_subdomain(prefix)
                        .into_iter()
                        .map(|e| format!("prefix part {e}")),
                );
            }
            *name
        }
        _ => {
            errors.push(format!(
                "a qualified name {} with an optional DNS subdomain prefix and '/' (e.g. 'example.com/MyName')",
                qualified_name_regex_error()
            ));
            return errors;
        }
    };

    if name.is_empty() {
        errors.push("name part must be non-empty".to_string());
    } else if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        errors.push(format!("name part must be no more than {QUALIFIED_NAME_MAX_LENGTH} characters"));
    }
    if !is_full_match(&QUALIFIED_NAME_REGEX, name) {
        errors.push(format!("name part {}", qualified_name_regex_error()));
    }
    errors
}

/// Validate annotation keys (lower-cased) as qualified names
///
/// One diagnostic per violation, for every offending key.
pub fn validate_annotations(annotations: &BTreeMap<String, String>, path: &str) -> Diagnostics {
    annotations
        .keys()
        .flat_map(|key| {
            is_qualified_name(&key.to_lowercase())
                .into_iter()
                .map(move |e| Diagnostic::error(path, format!("{path} ({key:?}) {e}")))
        })
        .collect()
}

/// Check that `value` is one of `allowed` (case sensitive)
pub fn validate_string_in_slice(value: &str, allowed: &[&str], path: &str) -> Diagnostics {
    if allowed.contains(&value) {
        return Diagnostics::new();
    }
    std::iter::once(Diagnostic::error(
        path,
        format!("expected {path} to be one of {allowed:?}, got {value}"),
    ))
    .collect()
}

/// Full configuration check for an IPPool resource
pub fn validate_ip_pool(data: &IPPoolData) -> Diagnostics {
    let mut diagnostics = validate_annotations(&data.metadata.annotations, ANNOTATIONS_PATH);

    if !data.metadata.resource_version.is_empty() && data.id.is_none() {
        diagnostics.push(Diagnostic::warning(
            "metadata.0.resource_version",
            "resource_version is computed by the server and is ignored in configuration",
        ));
    }

    if data.spec.cidr.trim().is_empty() {
        diagnostics.push(Diagnostic::error("spec.0.cidr", "cidr must be non-empty"));
    }

    diagnostics.extend(validate_string_in_slice(
        &data.spec.ipip_mode,
        &ENCAPSULATION_MODES,
        "spec.0.ipip_mode",
    ));
    diagnostics.extend(validate_string_in_slice(
        &data.spec.vxlan_mode,
        &ENCAPSULATION_MODES,
        "spec.0.vxlan_mode",
    ));

    if data.spec.ipip_mode != DEFAULT_MODE && data.spec.vxlan_mode != DEFAULT_MODE {
        diagnostics.push(Diagnostic::error(
            "spec.0.ipip_mode",
            "\"spec.0.ipip_mode\": conflicts with spec.0.vxlan_mode",
        ));
        diagnostics.push(Diagnostic::error(
            "spec.0.vxlan_mode",
            "\"spec.0.vxlan_mode\": conflicts with spec.0.ipip_mode",
        ));
    }

    diagnostics
}
