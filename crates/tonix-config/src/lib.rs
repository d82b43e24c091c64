//! Presets and configuration paths for the tonix tape colorer.
//!
//! # Features
//!
//! - **Presets**: Load and save colorer settings as TOML files
//! - **Validation**: Reject out-of-range values and unknown type names
//! - **Paths**: Platform-specific preset and config directories
//! - **Factory Presets**: Built-in starting points
//!
//! # Example
//!
//! ```rust,no_run
//! use tonix_colorer::Tonix;
//! use tonix_config::{Preset, get_factory_preset, user_presets_dir};
//!
//! let preset = get_factory_preset("warm_tape").unwrap();
//!
//! let mut tonix = Tonix::new();
//! preset.apply(&mut tonix).unwrap();
//!
//! // Keep a copy under the user presets directory
//! let mut mine = Preset::from_snapshot("My Tape", tonix.params(), tonix.compatibility());
//! mine.description = Some("Warm Tape, but mine".into());
//! mine.save(user_presets_dir().join("my_tape.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    factory_preset_names, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{find_preset, system_presets_dir, user_config_dir, user_presets_dir};
pub use preset::{Preset, PresetParams};

/// Load a preset by factory id/name first, then by file path or name on disk.
pub fn load_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset(name) {
        Some(path) => Preset::load(path),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}
