use std::fs;
use std::path::{Path, PathBuf};

use super::{user_settings_file, Settings};
use crate::errors::SettingsError;

/// Settings file looked up at the top of the source tree.
pub const SOURCE_SETTINGS_FILE: &str = "binobj-junction.toml";

/// Load settings for a run over `source_root`.
///
/// An `explicit` file must exist. Without one, the first existing file of
/// `<source_root>/binobj-junction.toml` and the per-user settings file wins;
/// with neither, the defaults apply.
pub fn load_settings(explicit: Option<&Path>, source_root: &Path) -> Result<Settings, SettingsError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        return read_settings_file(path);
    }

    let search: Vec<PathBuf> = std::iter::once(source_root.join(SOURCE_SETTINGS_FILE))
        .chain(user_settings_file())
        .collect();

    for path in &search {
        if path.is_file() {
            return read_settings_file(path);
        }
    }

    tracing::debug!("no settings file found, using defaults");
    Ok(Settings::default())
}

/// Parse and validate settings text. `origin` is only used in error messages.
pub fn parse_settings(text: &str, origin: &Path) -> Result<Settings, SettingsError> {
    let settings: Settings = toml::from_str(text).map_err(|source| SettingsError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    settings.validate()?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&text, path)?;
    tracing::debug!("loaded settings from {}", path.display());
    Ok(settings)
}
