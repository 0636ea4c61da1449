use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{AppError, Context, Result};

use super::Config;

/// Environment variable that points at the settings file when no path is given.
pub const CONFIG_PATH_ENV: &str = "FX_BAR_ENV";
pub const DEFAULT_CONFIG_FILE: &str = ".env";

/// Locate, read and validate the settings file.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let settings = load_settings(explicit)?;
    Config::from_map(&settings)
}

/// Read the dotenv-formatted settings file into a plain key/value map.
pub fn load_settings(explicit: Option<&Path>) -> Result<HashMap<String, String>> {
    let requested = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut last_error = None;

    for candidate in search_paths(&requested) {
        if !candidate.is_file() {
            last_error = Some(format!("{} does not exist", candidate.display()));
            continue;
        }

        debug!("reading settings from {}", candidate.display());
        return read_settings(&candidate);
    }

    Err(AppError::message(format!(
        "could not find settings file. Last error: {}",
        last_error.unwrap_or_else(|| "no search paths".to_string())
    )))
}

fn search_paths(path: &Path) -> Vec<PathBuf> {
    if path.is_absolute() {
        return vec![path.to_path_buf()];
    }

    let mut paths = vec![path.to_path_buf()];
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(path));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(path));
    }
    paths.dedup();
    paths
}

fn read_settings(path: &Path) -> Result<HashMap<String, String>> {
    let entries = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to open settings file {}", path.display()))?;

    let mut settings = HashMap::new();
    for entry in entries {
        let (key, value) = entry
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        settings.insert(key, value);
    }
    Ok(settings)
}
