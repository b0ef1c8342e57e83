use std::path::PathBuf;

use directories_next::ProjectDirs;

/// Per-user settings file, e.g. `~/.config/binobj-junction/settings.toml` on
/// Linux or `%APPDATA%\binobj-junction\config\settings.toml` on Windows.
///
/// Returns `None` when no home directory can be determined.
pub fn user_settings_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "binobj-junction").map(|dirs| dirs.config_dir().join("settings.toml"))
}
