use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::{ProjectDirs, UserDirs};

use crate::domain::entities::session::BatchMode;

pub const OUTPUT_FILE_NAME: &str = "merged_data.xlsx";
pub const OUTPUT_SHEET_NAME: &str = "Merged Data";
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods", "csv"];
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const PREVIEW_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_file_name: String,
    pub sheet_name: String,
    pub accepted_extensions: Vec<String>,
    pub default_batch_mode: BatchMode,
    pub preview_rows: usize,
    pub save_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_file_name: OUTPUT_FILE_NAME.to_string(),
            sheet_name: OUTPUT_SHEET_NAME.to_string(),
            accepted_extensions: SPREADSHEET_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            default_batch_mode: BatchMode::Replace,
            preview_rows: PREVIEW_ROWS,
            save_dir: default_save_dir(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "sheet-merge")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

/// Download directory when the platform has one, else the home directory.
pub fn default_save_dir() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    dirs.download_dir()
        .map(Path::to_path_buf)
        .or_else(|| Some(dirs.home_dir().to_path_buf()))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn defaults_match_the_merged_output_contract() {
        let config = AppConfig::default();

        assert_eq!(config.output_file_name, "merged_data.xlsx");
        assert_eq!(config.sheet_name, "Merged Data");
        assert_eq!(config.default_batch_mode, BatchMode::Replace);
        assert!(config.accepted_extensions.iter().any(|ext| ext == "xls"));
    }

    #[test]
    fn webview_dir_is_created_under_base() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let base = std::env::temp_dir().join(format!("sheet-merge-webview-{nanos}"));

        let dir = ensure_webview_data_dir(&base).expect("should create webview dir");

        assert!(dir.is_dir());
        assert!(dir.starts_with(&base));
        fs::remove_dir_all(&base).expect("should cleanup temp dir");
    }
}
