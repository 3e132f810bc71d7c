use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typerush";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn settings_path() -> PathBuf {
        Self::project_dirs()
            .map(|pd| pd.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("typerush_settings.json"))
    }

    pub fn history_path() -> PathBuf {
        Self::project_dirs()
            .map(|pd| pd.data_local_dir().join("history.csv"))
            .unwrap_or_else(|| PathBuf::from("typerush_history.csv"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("typerush.log")
        } else {
            Self::project_dirs()
                .map(|pd| pd.data_local_dir().join("typerush.log"))
                .unwrap_or_else(|| PathBuf::from("typerush.log"))
        }
    }
}
