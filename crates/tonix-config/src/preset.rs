//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use tonix_colorer::params::{INPUT_TRIM, OUTPUT_TRIM, PROCESS, descriptor};
use tonix_colorer::{Brightness, ColorType, Compatibility, ParamSnapshot, Tonix};

use crate::error::ConfigError;

/// A saved colorer setting.
///
/// Presets are TOML files. Every parameter is optional and falls back to
/// its default; type and brightness are stored by name.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Tape"
/// description = "Gentle Iridescent saturation"
/// compatibility = "corrected"
///
/// [params]
/// input_trim = 2.0
/// process = 45.0
/// output_trim = -1.0
/// brightness = "Gold"
/// type = "Iridescent"
/// bypass = false
/// auto_gain = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Coefficient semantics: `"corrected"` or `"legacy"`.
    #[serde(default = "default_compatibility")]
    pub compatibility: String,

    /// Parameter values.
    #[serde(default)]
    pub params: PresetParams,
}

fn default_compatibility() -> String {
    Compatibility::Corrected.name().to_string()
}

/// Parameter table of a preset, keyed by parameter string id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// Input trim in dB.
    pub input_trim: f32,
    /// Processing amount in percent.
    pub process: f32,
    /// Output trim in dB.
    pub output_trim: f32,
    /// Brightness name.
    pub brightness: String,
    /// Type name.
    #[serde(rename = "type")]
    pub color: String,
    /// Bypass engaged.
    pub bypass: bool,
    /// Auto-gain enabled.
    pub auto_gain: bool,
}

impl Default for PresetParams {
    fn default() -> Self {
        Self::from(&ParamSnapshot::default())
    }
}

impl From<&ParamSnapshot> for PresetParams {
    fn from(snap: &ParamSnapshot) -> Self {
        Self {
            input_trim: snap.input_trim_db,
            process: snap.process_percent,
            output_trim: snap.output_trim_db,
            brightness: snap.brightness.name().to_string(),
            color: snap.color.name().to_string(),
            bypass: snap.bypass,
            auto_gain: snap.auto_gain,
        }
    }
}

impl Preset {
    /// Create a preset holding default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            compatibility: default_compatibility(),
            params: PresetParams::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Capture a snapshot and compatibility setting as a preset.
    pub fn from_snapshot(
        name: impl Into<String>,
        snap: &ParamSnapshot,
        compatibility: Compatibility,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            compatibility: compatibility.name().to_string(),
            params: PresetParams::from(snap),
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed compatibility setting.
    pub fn compatibility(&self) -> Result<Compatibility, ConfigError> {
        Compatibility::from_name(&self.compatibility).ok_or_else(|| {
            ConfigError::invalid_param(
                "compatibility",
                format!("unknown value '{}' (corrected, legacy)", self.compatibility),
            )
        })
    }

    /// Check every value against its parameter range and every name
    /// against the known types and brightness values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_snapshot().map(|_| ())
    }

    /// Validated parameters as a snapshot.
    pub fn to_snapshot(&self) -> Result<ParamSnapshot, ConfigError> {
        let p = &self.params;
        self.compatibility()?;

        let color = ColorType::from_name(&p.color).ok_or_else(|| {
            ConfigError::invalid_param(
                "type",
                format!(
                    "unknown type '{}' ({})",
                    p.color,
                    ColorType::NAMES.join(", ")
                ),
            )
        })?;
        let brightness = Brightness::from_name(&p.brightness).ok_or_else(|| {
            ConfigError::invalid_param(
                "brightness",
                format!(
                    "unknown brightness '{}' ({})",
                    p.brightness,
                    Brightness::NAMES.join(", ")
                ),
            )
        })?;

        Ok(ParamSnapshot {
            input_trim_db: checked(INPUT_TRIM, p.input_trim)?,
            process_percent: checked(PROCESS, p.process)?,
            output_trim_db: checked(OUTPUT_TRIM, p.output_trim)?,
            brightness,
            color,
            bypass: p.bypass,
            auto_gain: p.auto_gain,
        })
    }

    /// Validate, then load parameters and compatibility into a colorer.
    pub fn apply(&self, tonix: &mut Tonix) -> Result<(), ConfigError> {
        let snap = self.to_snapshot()?;
        tonix.set_compatibility(self.compatibility()?);
        tonix.set_params(snap);
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

fn checked(index: usize, value: f32) -> Result<f32, ConfigError> {
    let Some(desc) = descriptor(index) else {
        return Err(ConfigError::invalid_param(
            format!("#{index}"),
            "no such parameter",
        ));
    };
    if !value.is_finite() || value < desc.min || value > desc.max {
        return Err(ConfigError::invalid_param(
            desc.string_id,
            format!(
                "{value} is outside {}..{}{}",
                desc.min,
                desc.max,
                desc.unit.suffix()
            ),
        ));
    }
    Ok(value)
}
