// Settings document loading
// Probed from ./zrecon.yml, ./config/zrecon.yml, then the user config dir.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use zrecon_engine::Settings;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "cannot parse {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Full settings document. Unknown sections are ignored so the document can
/// carry keys for other tooling.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
}

/// Candidate locations, probed in order. The first existing file wins.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("zrecon.yml"),
        PathBuf::from("config/zrecon.yml"),
    ];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("zrecon").join("zrecon.yml"));
    }
    paths
}

/// Load settings from an explicit document. An empty document means
/// defaults, matching an absent one.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if text.trim().is_empty() {
        return Ok(Settings::default());
    }
    let file: ConfigFile = serde_yaml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(file.settings)
}

/// Probe the candidate locations; defaults apply when no document exists.
pub fn discover() -> Result<Settings, ConfigError> {
    for path in candidate_paths() {
        if path.exists() {
            return load_from(&path);
        }
    }
    Ok(Settings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zrecon.yml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_old_data_setting() {
        let (_dir, path) = write_config("settings:\n  old_data: false\n");
        let settings = load_from(&path).unwrap();
        assert!(!settings.include_old_data);
    }

    #[test]
    fn missing_settings_block_defaults_to_old_data() {
        let (_dir, path) = write_config("other_tool:\n  enabled: true\n");
        let settings = load_from(&path).unwrap();
        assert!(settings.include_old_data);
    }

    #[test]
    fn empty_document_means_defaults() {
        let (_dir, path) = write_config("");
        let settings = load_from(&path).unwrap();
        assert!(settings.include_old_data);
    }

    #[test]
    fn unreadable_document_is_an_io_error() {
        let err = load_from(Path::new("/no/such/zrecon.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("zrecon.yml"));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let (_dir, path) = write_config("settings: [not, a, mapping\n");
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn candidate_paths_probe_working_dir_first() {
        let paths = candidate_paths();
        assert_eq!(paths[0], PathBuf::from("zrecon.yml"));
        assert_eq!(paths[1], PathBuf::from("config/zrecon.yml"));
    }
}
