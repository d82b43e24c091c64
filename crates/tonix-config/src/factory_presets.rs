//! Factory presets bundled with tonix.
//!
//! Embedded at compile time, always available without external files.

use crate::Preset;

/// TOML content for factory presets, keyed by id.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("glue", GLUE_PRESET),
    ("warm_tape", WARM_TAPE_PRESET),
    ("bright_lift", BRIGHT_LIFT_PRESET),
    ("radiant_push", RADIANT_PUSH_PRESET),
    ("luster_crush", LUSTER_CRUSH_PRESET),
    ("dark_drive", DARK_DRIVE_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Default settings, processing off"

[params]
input_trim = 0.0
process = 0.0
output_trim = 0.0
brightness = "Gold"
type = "Iridescent"
bypass = false
auto_gain = true
"#;

const GLUE_PRESET: &str = r#"
name = "Glue"
description = "A light coat of Luminiscent for bus glue"

[params]
process = 20.0
brightness = "Gold"
type = "Luminiscent"
"#;

const WARM_TAPE_PRESET: &str = r#"
name = "Warm Tape"
description = "Iridescent with the darker Opal edges"

[params]
input_trim = 2.0
process = 45.0
output_trim = -1.0
brightness = "Opal"
type = "Iridescent"
"#;

const BRIGHT_LIFT_PRESET: &str = r#"
name = "Bright Lift"
description = "Sapphire edges for air on vocals and overheads"

[params]
process = 35.0
brightness = "Sapphire"
type = "Luminiscent"
"#;

const RADIANT_PUSH_PRESET: &str = r#"
name = "Radiant Push"
description = "The gentle asymmetric shaper driven hard"

[params]
input_trim = 4.0
process = 70.0
brightness = "Gold"
type = "Radiant"
"#;

const LUSTER_CRUSH_PRESET: &str = r#"
name = "Luster Crush"
description = "Full-depth Luster with auto-gain holding the level"

[params]
input_trim = 6.0
process = 90.0
output_trim = -2.0
brightness = "Opal"
type = "Luster"
auto_gain = true
"#;

const DARK_DRIVE_PRESET: &str = r#"
name = "Dark Drive"
description = "Dark Essence as the first release shipped it"
compatibility = "legacy"

[params]
input_trim = 3.0
process = 80.0
brightness = "Sapphire"
type = "Dark Essence"
"#;

/// All factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Factory preset by id (`"warm_tape"`) or display name (`"Warm Tape"`),
/// case-insensitive.
///
/// # Example
///
/// ```rust
/// use tonix_config::get_factory_preset;
///
/// let preset = get_factory_preset("WARM_TAPE").unwrap();
/// assert_eq!(preset.name, "Warm Tape");
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Ids of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset id or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
