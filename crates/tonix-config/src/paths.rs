//! Where presets live on disk.
//!
//! | Location | Linux | macOS | Windows |
//! |---|---|---|---|
//! | config | `~/.config/tonix` | `~/Library/Application Support/tonix` | `%APPDATA%\tonix` |
//! | user presets | `<config>/presets` | `<config>/presets` | `<config>\presets` |
//! | system presets | `/usr/share/tonix/presets` | `/Library/Application Support/tonix/presets` | `<data>\tonix\presets` |
//!
//! Lookups by name try user presets before system presets, so a user file
//! shadows a system file of the same name.
//!
//! ```rust,no_run
//! use tonix_config::paths;
//!
//! for (source, path) in paths::list_all_presets() {
//!     println!("{source:?}: {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_DIR: &str = "tonix";
const PRESETS_DIR: &str = "presets";
const PRESET_EXTENSION: &str = "toml";

/// Which directory a preset file was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSource {
    /// The per-user presets directory.
    User,
    /// The read-only system presets directory.
    System,
}

/// Per-user configuration directory, `./tonix` if the platform has none.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Per-user presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_DIR)
}

/// System-wide presets directory.
pub fn system_presets_dir() -> PathBuf {
    let base = if cfg!(target_os = "linux") {
        PathBuf::from("/usr/share")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Application Support")
    } else {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    base.join(APP_DIR).join(PRESETS_DIR)
}

/// Preset directories in lookup order.
pub fn search_dirs() -> [(PresetSource, PathBuf); 2] {
    [
        (PresetSource::User, user_presets_dir()),
        (PresetSource::System, system_presets_dir()),
    ]
}

/// Resolve a preset argument to a file.
///
/// An existing file path wins. Otherwise `name` (with `.toml` appended if
/// missing) is looked up in [`search_dirs`] order.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }

    let file_name = preset_file_name(name);
    search_dirs()
        .into_iter()
        .map(|(_, dir)| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

/// Preset files in the user presets directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Preset files in the system presets directory.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// Every preset file on disk, user presets first.
pub fn list_all_presets() -> Vec<(PresetSource, PathBuf)> {
    search_dirs()
        .into_iter()
        .flat_map(|(source, dir)| {
            list_presets_in_dir(&dir)
                .into_iter()
                .map(move |path| (source, path))
        })
        .collect()
}

/// Preset files directly inside `dir`, sorted. Missing or unreadable
/// directories yield nothing.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_preset_file(path))
        .collect();
    found.sort();
    found
}

/// Preset name for a file: its stem.
///
/// ```rust
/// use std::path::Path;
/// use tonix_config::paths::preset_name_from_path;
///
/// assert_eq!(
///     preset_name_from_path(Path::new("/presets/dark_drive.toml")).as_deref(),
///     Some("dark_drive")
/// );
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()?.to_str().map(str::to_owned)
}

fn preset_file_name(name: &str) -> String {
    if Path::new(name)
        .extension()
        .is_some_and(|ext| ext == PRESET_EXTENSION)
    {
        name.to_owned()
    } else {
        format!("{name}.{PRESET_EXTENSION}")
    }
}

fn is_preset_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == PRESET_EXTENSION)
}
