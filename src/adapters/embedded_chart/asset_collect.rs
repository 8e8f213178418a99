use include_dir::{Dir, DirEntry};
use std::path::Path;

use crate::domain::AppError;

const TEMPLATES_PREFIX: &str = "templates/";

#[derive(Debug, Clone)]
pub struct ChartSourceFile {
    pub content: String,
    relative_path: String,
}

impl ChartSourceFile {
    /// Files under `templates/` are rendered; everything else is chart data.
    pub fn is_template(&self) -> bool {
        self.relative_path.starts_with(TEMPLATES_PREFIX)
    }

    /// Helpers (`_helpers.tpl`, `_instance.yaml`) are only ever imported or
    /// included, never rendered on their own.
    pub fn is_partial(&self) -> bool {
        Path::new(&self.relative_path)
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('_'))
    }

    pub fn template_name(&self) -> &str {
        &self.relative_path
    }
}

pub fn collect_chart_sources(chart_dir: &Dir) -> Result<Vec<ChartSourceFile>, AppError> {
    let mut files = Vec::new();
    collect_entries(chart_dir, chart_dir.path(), &mut files)?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

pub fn find_source<'a>(
    sources: &'a [ChartSourceFile],
    relative_path: &str,
) -> Result<&'a ChartSourceFile, AppError> {
    sources
        .iter()
        .find(|source| source.relative_path == relative_path)
        .ok_or_else(|| AppError::ChartNotFound(format!("embedded chart is missing {relative_path}")))
}

fn collect_entries(
    dir: &Dir,
    base_path: &Path,
    files: &mut Vec<ChartSourceFile>,
) -> Result<(), AppError> {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let content = file.contents_utf8().ok_or_else(|| {
                    AppError::InvalidManifest(format!(
                        "Chart file is not UTF-8: {}",
                        file.path().to_string_lossy()
                    ))
                })?;

                let file_path = file.path();
                let relative_path = file_path.strip_prefix(base_path).map_err(|_| {
                    AppError::InvalidManifest(format!(
                        "Chart file has unexpected path: {}",
                        file_path.to_string_lossy()
                    ))
                })?;

                // Template names always use forward slashes, as in Helm.
                let relative_path = relative_path.to_string_lossy().replace('\\', "/");
                files.push(ChartSourceFile { content: content.to_string(), relative_path });
            }
            DirEntry::Dir(subdir) => collect_entries(subdir, base_path, files)?,
        }
    }

    Ok(())
}
