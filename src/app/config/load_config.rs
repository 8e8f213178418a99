use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::render_config::CONFIG_FILE_NAME;
use crate::domain::{AppError, RenderConfig};

/// Load the render configuration.
///
/// An explicit path must exist. Without one, `dagster-chart.toml` in `cwd` is
/// used when present and defaults apply otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<RenderConfig, AppError> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(RenderConfig::default());
            }
            candidate
        }
    };

    debug!(path = %path.display(), "loading render config");
    RenderConfig::parse(&fs::read_to_string(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.release.name, "release-name");
    }

    #[test]
    fn default_file_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[release]\nnamespace = \"dagster\"\n")
            .unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.release.namespace, "dagster");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("other.toml")), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
