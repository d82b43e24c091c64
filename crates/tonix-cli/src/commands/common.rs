//! Tone options and parameter parsing shared by several commands.

use anyhow::{Context, bail};
use clap::Args;
use tonix_colorer::params::{
    AUTO_GAIN, BRIGHTNESS, BYPASS, INPUT_TRIM, OUTPUT_TRIM, PARAM_COUNT, PROCESS, TYPE, descriptor,
};
use tonix_colorer::{Brightness, ColorType, Compatibility, ParamSnapshot, Tonix};
use tonix_core::ParamUnit;

/// Colorer settings accepted by `process`, `realtime` and `presets save`.
///
/// Explicit options override values loaded from `--preset`.
#[derive(Args, Debug, Default, Clone)]
pub struct ToneArgs {
    /// Preset name (factory or user) or path to a preset file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Input trim in dB (-10 to 10)
    #[arg(long, allow_negative_numbers = true)]
    pub input_trim: Option<f32>,

    /// Processing amount in percent (0 to 100)
    #[arg(long)]
    pub process: Option<f32>,

    /// Output trim in dB (-6 to 6)
    #[arg(long, allow_negative_numbers = true)]
    pub output_trim: Option<f32>,

    /// Type: luminiscent, iridescent, radiant, luster, dark-essence
    #[arg(long = "type", value_name = "TYPE", value_parser = parse_color)]
    pub color: Option<ColorType>,

    /// Brightness: opal, gold, sapphire
    #[arg(long, value_parser = parse_brightness)]
    pub brightness: Option<Brightness>,

    /// Engage bypass
    #[arg(long)]
    pub bypass: bool,

    /// Disable auto-gain compensation
    #[arg(long)]
    pub no_auto_gain: bool,

    /// Reproduce the first-release coefficient and auto-gain behaviour
    #[arg(long)]
    pub legacy: bool,
}

/// Resolved colorer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    /// Parameter values.
    pub params: ParamSnapshot,
    /// Coefficient semantics.
    pub compatibility: Compatibility,
    /// Name of the preset the values started from, if any.
    pub preset_name: Option<String>,
}

impl Tone {
    /// Load parameters and compatibility into a colorer.
    pub fn apply(&self, tonix: &mut Tonix) {
        tonix.set_compatibility(self.compatibility);
        tonix.set_params(self.params);
    }

    /// One-line summary for console output.
    pub fn summary(&self) -> String {
        describe(&self.params, self.compatibility)
    }
}

impl ToneArgs {
    /// Start from the preset (or defaults) and apply explicit options.
    pub fn resolve(&self) -> anyhow::Result<Tone> {
        let (mut params, mut compatibility, preset_name) = match &self.preset {
            Some(name) => {
                let preset = tonix_config::load_preset(name).with_context(|| {
                    format!("preset '{name}' (see 'tonix presets list')")
                })?;
                let params = preset.to_snapshot()?;
                (params, preset.compatibility()?, Some(preset.name))
            }
            None => (ParamSnapshot::default(), Compatibility::Corrected, None),
        };

        if let Some(db) = self.input_trim {
            params.input_trim_db = checked(INPUT_TRIM, db)?;
        }
        if let Some(percent) = self.process {
            params.process_percent = checked(PROCESS, percent)?;
        }
        if let Some(db) = self.output_trim {
            params.output_trim_db = checked(OUTPUT_TRIM, db)?;
        }
        if let Some(color) = self.color {
            params.color = color;
        }
        if let Some(brightness) = self.brightness {
            params.brightness = brightness;
        }
        if self.bypass {
            params.bypass = true;
        }
        if self.no_auto_gain {
            params.auto_gain = false;
        }
        if self.legacy {
            compatibility = Compatibility::Legacy;
        }

        Ok(Tone {
            params,
            compatibility,
            preset_name,
        })
    }
}

/// Parse a `key=value` assignment into a parameter index and value.
///
/// Keys are parameter ids (`process`, `type`, `auto_gain`, ...) or display
/// names. Choices take names, toggles take `on`/`off`, numbers are range
/// checked.
pub fn parse_assignment(line: &str) -> anyhow::Result<(usize, f32)> {
    let Some((key, value)) = line.split_once('=') else {
        bail!("invalid assignment '{line}' (expected key=value)");
    };
    let (key, value) = (key.trim(), value.trim());

    let index = (0..PARAM_COUNT)
        .find(|&i| {
            descriptor(i).is_some_and(|d| {
                d.string_id.eq_ignore_ascii_case(key) || d.name.eq_ignore_ascii_case(key)
            })
        })
        .with_context(|| {
            let ids: Vec<_> = (0..PARAM_COUNT)
                .filter_map(descriptor)
                .map(|d| d.string_id)
                .collect();
            format!("unknown parameter '{key}' ({})", ids.join(", "))
        })?;

    let value = match index {
        TYPE => parse_color(value)
            .map(|c| c.index() as f32)
            .map_err(anyhow::Error::msg)?,
        BRIGHTNESS => parse_brightness(value)
            .map(|b| b.index() as f32)
            .map_err(anyhow::Error::msg)?,
        BYPASS | AUTO_GAIN => {
            if parse_switch(value).context(format!("'{value}' is not on or off"))? {
                1.0
            } else {
                0.0
            }
        }
        _ => {
            let number: f32 = value
                .parse()
                .with_context(|| format!("'{value}' is not a number"))?;
            checked(index, number)?
        }
    };

    Ok((index, value))
}

/// Clap value parser for color types.
pub fn parse_color(s: &str) -> Result<ColorType, String> {
    ColorType::from_name(s).ok_or_else(|| {
        format!(
            "unknown type '{s}' (expected one of: {})",
            ColorType::NAMES.join(", ")
        )
    })
}

/// Clap value parser for brightness values.
pub fn parse_brightness(s: &str) -> Result<Brightness, String> {
    Brightness::from_name(s).ok_or_else(|| {
        format!(
            "unknown brightness '{s}' (expected one of: {})",
            Brightness::NAMES.join(", ")
        )
    })
}

fn parse_switch(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn checked(index: usize, value: f32) -> anyhow::Result<f32> {
    let desc = descriptor(index).with_context(|| format!("no parameter #{index}"))?;
    if !value.is_finite() || value < desc.min || value > desc.max {
        bail!(
            "{} must be within {}..{}{} (got {value})",
            desc.string_id,
            desc.min,
            desc.max,
            desc.unit.suffix()
        );
    }
    Ok(value)
}

/// Human-readable summary of a snapshot.
pub fn describe(params: &ParamSnapshot, compatibility: Compatibility) -> String {
    let mut parts = vec![
        format!("{} / {}", params.color.name(), params.brightness.name()),
        format!("process {:.1}%", params.process_percent),
        format!("trims {:+.1}/{:+.2} dB", params.input_trim_db, params.output_trim_db),
        format!(
            "auto-gain {}",
            if params.auto_gain { "on" } else { "off" }
        ),
    ];
    if params.bypass {
        parts.push("BYPASSED".to_string());
    }
    if compatibility == Compatibility::Legacy {
        parts.push("legacy".to_string());
    }
    parts.join(", ")
}

/// Format a parameter value with its unit or label.
pub fn format_value(index: usize, value: f32) -> String {
    let Some(desc) = descriptor(index) else {
        return value.to_string();
    };
    match desc.unit {
        ParamUnit::Choice => desc.label(value).unwrap_or("?").to_string(),
        ParamUnit::Toggle => String::from(if value >= 0.5 { "on" } else { "off" }),
        ParamUnit::Decibels | ParamUnit::Percent | ParamUnit::None => {
            format!("{value:.2}{}", desc.unit.suffix())
        }
    }
}
