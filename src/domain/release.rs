//! Release and chart identity used for object names and labels.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Release name `helm template` uses when none is given.
pub const DEFAULT_RELEASE_NAME: &str = "release-name";
pub const DEFAULT_NAMESPACE: &str = "default";

/// Kubernetes limits DNS-1123 labels (and so most object names) to 63 chars.
pub const MAX_NAME_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub name: String,
    pub namespace: String,
}

impl Default for ReleaseInfo {
    fn default() -> Self {
        Self { name: DEFAULT_RELEASE_NAME.to_string(), namespace: DEFAULT_NAMESPACE.to_string() }
    }
}

impl ReleaseInfo {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { name: name.into(), namespace: namespace.into() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        // Helm reserves ten characters of the 63 for suffixes on release names.
        let fields = [("release name", &self.name, 53), ("namespace", &self.namespace, MAX_NAME_LEN)];
        for (what, value, max_len) in fields {
            check_dns_label(value, max_len)
                .map_err(|reason| AppError::config_error(format!("Invalid {what} '{value}': {reason}")))?;
        }
        Ok(())
    }
}

/// Check `value` is a DNS-1123 label of at most `max_len` characters.
///
/// Returns the reason it is not.
pub fn check_dns_label(value: &str, max_len: usize) -> Result<(), String> {
    if value.is_empty() || value.len() > max_len {
        return Err(format!("must be 1-{max_len} characters"));
    }
    let valid = value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid || value.starts_with('-') || value.ends_with('-') {
        return Err("must be lowercase alphanumeric with hyphens".to_string());
    }
    Ok(())
}

/// `Chart.yaml` fields the templates read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

impl ChartMetadata {
    /// `chart` label value: `<name>-<version>` with `+` replaced.
    pub fn label(&self) -> String {
        format!("{}-{}", self.name, self.version).replace('+', "_")
    }

    /// Short name: `nameOverride` or the chart name.
    pub fn short_name(&self, name_override: Option<&str>) -> String {
        let name = name_override.filter(|name| !name.is_empty()).unwrap_or(&self.name);
        truncate_name(name)
    }

    /// Fully qualified app name, used as the prefix of every object name.
    ///
    /// `fullnameOverride` wins; otherwise the release name, suffixed with the
    /// chart name unless it already contains it.
    pub fn fullname(
        &self,
        release: &ReleaseInfo,
        name_override: Option<&str>,
        fullname_override: Option<&str>,
    ) -> String {
        if let Some(fullname) = fullname_override.filter(|name| !name.is_empty()) {
            return truncate_name(fullname);
        }
        let name = name_override.filter(|name| !name.is_empty()).unwrap_or(&self.name);
        if release.name.contains(name) {
            truncate_name(&release.name)
        } else {
            truncate_name(&format!("{}-{}", release.name, name))
        }
    }
}

fn truncate_name(name: &str) -> String {
    let truncated: String = name.chars().take(MAX_NAME_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}
