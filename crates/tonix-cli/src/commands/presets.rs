//! Preset management commands.
//!
//! Lists factory and user presets, shows a preset's values, and saves tone
//! options as a new user preset.

use super::common::{ToneArgs, describe, format_value};
use anyhow::bail;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use tonix_colorer::params::{PARAM_COUNT, descriptor};
use tonix_config::{
    Preset, factory_presets, load_preset, paths, system_presets_dir, user_config_dir,
    user_presets_dir,
};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show the values stored in a preset
    Show {
        /// Preset name or path
        name: String,

        /// Print the raw TOML instead
        #[arg(long)]
        toml: bool,
    },

    /// Save tone options as a user preset
    Save {
        /// Name for the new preset
        name: String,

        #[command(flatten)]
        tone: ToneArgs,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Directory to save into (default: user presets directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Overwrite if the preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name, toml } => show_preset(&name, toml),
        PresetsCommand::Save {
            name,
            tone,
            description,
            dir,
            force,
        } => save_preset(&name, &tone, description, dir, force),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = paths::list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create one with: tonix presets save <name> --type luster --process 40");
        } else {
            print_preset_files(&user_presets);
        }
        println!();

        let system_presets = paths::list_system_presets();
        if !system_presets.is_empty() {
            println!("System Presets:");
            println!("===============");
            print_preset_files(&system_presets);
            println!();
        }
    }

    Ok(())
}

fn print_preset_files(files: &[PathBuf]) {
    for path in files {
        let name = paths::preset_name_from_path(path).unwrap_or_default();
        match Preset::load(path) {
            Ok(preset) => {
                let desc = preset.description.as_deref().unwrap_or("");
                println!("  {name:20} - {desc}");
            }
            Err(_) => println!("  {name:20} - (error loading)"),
        }
    }
}

fn show_preset(name: &str, raw: bool) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    if raw {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    let snap = preset.to_snapshot()?;
    let compatibility = preset.compatibility()?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    println!("Parameters:");
    for index in 0..PARAM_COUNT {
        if let Some(desc) = descriptor(index) {
            println!(
                "  {:12} {}",
                desc.string_id,
                format_value(index, snap.get(index))
            );
        }
    }
    println!("  {:12} {}", "compat", compatibility.name());
    println!();
    println!("Summary: {}", describe(&snap, compatibility));

    Ok(())
}

fn save_preset(
    name: &str,
    tone: &ToneArgs,
    description: Option<String>,
    dir: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => paths::ensure_user_presets_dir()?,
    };
    let path = preset_path(&dir, name);

    if path.exists() && !force {
        bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let resolved = tone.resolve()?;
    let mut preset = Preset::from_snapshot(name, &resolved.params, resolved.compatibility);
    preset.description = description;
    preset.save(&path)?;

    println!("Saved preset '{}' to {}", name, path.display());
    println!("  {}", resolved.summary());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    println!("Config dir:     {}", user_config_dir().display());

    Ok(())
}

/// File path for a preset name: lowercase, with runs of anything other
/// than letters and digits collapsed to `_`.
fn preset_path(dir: &Path, name: &str) -> PathBuf {
    let mut stem = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "preset" } else { stem };
    dir.join(format!("{stem}.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_path() {
        let dir = Path::new("/presets");
        assert_eq!(
            preset_path(dir, "Warm Tape"),
            PathBuf::from("/presets/warm_tape.toml")
        );
        assert_eq!(
            preset_path(dir, "  Dark -- Drive! "),
            PathBuf::from("/presets/dark_drive.toml")
        );
        assert_eq!(preset_path(dir, "???"), PathBuf::from("/presets/preset.toml"));
    }
}
