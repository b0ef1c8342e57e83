pub mod config_dirs;
pub mod read_settings;

use serde::Deserialize;

use crate::errors::SettingsError;

// Re-export commonly used types/functions for convenience
pub use config_dirs::user_settings_file;
pub use read_settings::{load_settings, parse_settings, SOURCE_SETTINGS_FILE};

/// How output directories are laid out under the aggregate folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// Every output directory links to the aggregate folder itself.
    #[default]
    Shared,
    /// Each output directory links to its own path mirrored below the
    /// aggregate folder.
    Mirrored,
}

/// Tunables for discovery and linking. Every key is optional in the TOML
/// form; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Extensions (without the dot) that mark a project file.
    pub project_extensions: Vec<String>,
    /// Extensions that mark a solution file.
    pub solution_extensions: Vec<String>,
    /// Name of the intermediate directory next to each project and solution.
    pub intermediate_dir: String,
    /// Folder under the junction root that receives the output junctions.
    pub aggregate_dir: String,
    /// Collapse `bin/<config>/<tfm>` style output paths down to `bin`.
    pub collapse_to_bin: bool,
    pub output_layout: OutputLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_extensions: vec!["csproj".into(), "vbproj".into(), "fsproj".into()],
            solution_extensions: vec!["sln".into()],
            intermediate_dir: "obj".into(),
            aggregate_dir: "_allbin".into(),
            collapse_to_bin: true,
            output_layout: OutputLayout::Shared,
        }
    }
}

impl Settings {
    /// Reject values that would make the scanner or the synchronizer escape
    /// the directories they are meant to manage.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (key, value) in [
            ("intermediate_dir", &self.intermediate_dir),
            ("aggregate_dir", &self.aggregate_dir),
        ] {
            if !is_plain_segment(value) {
                return Err(SettingsError::Invalid(format!(
                    "`{key}` must be a single folder name, got {value:?}"
                )));
            }
        }
        for (key, list) in [
            ("project_extensions", &self.project_extensions),
            ("solution_extensions", &self.solution_extensions),
        ] {
            if list.is_empty() {
                return Err(SettingsError::Invalid(format!("`{key}` must not be empty")));
            }
            if let Some(bad) = list
                .iter()
                .find(|ext| ext.is_empty() || ext.starts_with('.'))
            {
                return Err(SettingsError::Invalid(format!(
                    "`{key}` entries are bare extensions like \"csproj\", got {bad:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.intermediate_dir, "obj");
        assert_eq!(s.aggregate_dir, "_allbin");
        assert_eq!(s.output_layout, OutputLayout::Shared);
        assert!(s.collapse_to_bin);
    }

    #[test]
    fn nested_folder_names_are_rejected() {
        let s = Settings {
            intermediate_dir: "build/obj".into(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::Invalid(_))));

        let s = Settings {
            aggregate_dir: "..".into(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn empty_or_dotted_extensions_are_rejected() {
        let s = Settings {
            solution_extensions: vec![],
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::Invalid(_))));

        let s = Settings {
            project_extensions: vec![".csproj".into()],
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::Invalid(_))));
    }
}
