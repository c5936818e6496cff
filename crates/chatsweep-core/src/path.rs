use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Environment variable that relocates the chatsweep data directory.
pub const DATA_DIR_ENV: &str = "CHATSWEEP_PATH";

/// Resolve the chatsweep data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CHATSWEEP_PATH environment variable (with tilde expansion)
/// 3. System data directory
/// 4. ~/.chatsweep
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(DATA_DIR_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("chatsweep"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".chatsweep"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or system data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Default location of the IDE's `User` directory for this platform.
pub fn default_cursor_user_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Cannot find home directory".to_string()))?;
        Ok(home.join("Library/Application Support/Cursor/User"))
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| Error::Config("Cannot find APPDATA".to_string()))?;
        Ok(PathBuf::from(appdata).join("Cursor/User"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Cannot find home directory".to_string()))?;
        Ok(home.join(".config/Cursor/User"))
    }
}

/// Resolve the IDE `User` directory: explicit override first, then platform default.
pub fn resolve_cursor_user_dir(explicit_path: Option<&Path>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => Ok(expand_tilde(&path.to_string_lossy())),
        None => default_cursor_user_dir(),
    }
}

/// Convert a `file://` URI as written in `workspace.json` to a plain path.
///
/// Only `%20` is decoded; other escapes are kept verbatim so paths compare
/// equal to the ones the IDE shows.
pub fn uri_to_path(uri: &str) -> String {
    uri.replace("file://", "").replace("%20", " ")
}
