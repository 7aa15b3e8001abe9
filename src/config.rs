use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::language::{PracticeMode, WordList, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_words: usize,
    pub mode: PracticeMode,
    pub word_list: WordList,
    pub base_url: String,
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_words: 15,
            mode: PracticeMode::All,
            word_list: WordList::English,
            base_url: DEFAULT_BASE_URL.to_string(),
            offline: false,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Read-only JSON settings file. A missing file means defaults.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));

        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn load_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "number_of_words": 40,
                "mode": "left-hand",
                "word_list": "english_10k",
                "base_url": "http://localhost:8080/lists",
                "offline": true
            }"#,
        )
        .unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(
            cfg,
            Config {
                number_of_words: 40,
                mode: PracticeMode::LeftHand,
                word_list: WordList::English10k,
                base_url: "http://localhost:8080/lists".into(),
                offline: true,
            }
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"mode": "right-hand"}"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.mode, PracticeMode::RightHand);
        assert_eq!(cfg.number_of_words, 15);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ number_of_words: ").unwrap();

        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(ConfigError::Parse { .. })
        );
    }

    #[test]
    fn directory_instead_of_file_is_an_error() {
        let dir = tempdir().unwrap();

        assert_matches!(
            FileConfigStore::with_path(dir.path()).load(),
            Err(ConfigError::Io { .. })
        );
    }
}
