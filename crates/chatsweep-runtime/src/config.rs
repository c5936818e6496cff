use crate::Result;
use chatsweep_core::{expand_tilde, resolve_cursor_user_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const TRASH_DB_FILE: &str = "trash.db";

fn default_native_batch() -> bool {
    true
}

/// Contents of `<data dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Override of the IDE `User` directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_user_dir: Option<PathBuf>,

    /// Override of the trash database location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trash_db: Option<PathBuf>,

    /// Send multi-session deletes to the store in one call instead of one
    /// call per session.
    #[serde(default = "default_native_batch")]
    pub native_batch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cursor_user_dir: None,
            trash_db: None,
            native_batch: default_native_batch(),
        }
    }
}

/// Locations every command works with, after applying overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPaths {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    pub cursor_user_dir: PathBuf,
    pub trash_db: PathBuf,
}

impl Config {
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Resolve paths. The IDE directory comes from `cursor_override`, then
    /// this config, then the platform default.
    pub fn resolve_paths(
        &self,
        data_dir: &Path,
        cursor_override: Option<&Path>,
    ) -> Result<ResolvedPaths> {
        let cursor_user_dir =
            resolve_cursor_user_dir(cursor_override.or(self.cursor_user_dir.as_deref()))?;

        let trash_db = match &self.trash_db {
            Some(path) => expand_tilde(&path.to_string_lossy()),
            None => data_dir.join(TRASH_DB_FILE),
        };

        Ok(ResolvedPaths {
            data_dir: data_dir.to_path_buf(),
            config_path: Self::path_in(data_dir),
            cursor_user_dir,
            trash_db,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.native_batch);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_in(dir.path());
        let config = Config {
            cursor_user_dir: Some(PathBuf::from("/opt/cursor/User")),
            trash_db: None,
            native_batch: false,
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("trash_db"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_in(dir.path());
        std::fs::write(&path, "trash_db = \"/tmp/t.db\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.trash_db, Some(PathBuf::from("/tmp/t.db")));
        assert!(config.native_batch);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_in(dir.path());
        std::fs::write(&path, "native_batch = maybe").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_resolve_paths_priority() {
        let config = Config {
            cursor_user_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };

        let paths = config
            .resolve_paths(Path::new("/data"), Some(Path::new("/from/flag")))
            .unwrap();
        assert_eq!(paths.cursor_user_dir, PathBuf::from("/from/flag"));
        assert_eq!(paths.trash_db, PathBuf::from("/data/trash.db"));
        assert_eq!(paths.config_path, PathBuf::from("/data/config.toml"));

        let paths = config.resolve_paths(Path::new("/data"), None).unwrap();
        assert_eq!(paths.cursor_user_dir, PathBuf::from("/from/config"));
    }
}
