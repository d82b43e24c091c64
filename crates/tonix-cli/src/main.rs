//! Tonix CLI - command-line front end for the tonix tape colorer.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tonix")]
#[command(author, version, about = "Tonix tape-style colorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color a WAV file
    Process(commands::process::ProcessArgs),

    /// Color live audio from an input device to an output device
    Realtime(commands::realtime::RealtimeArgs),

    /// Display WAV file metadata and levels
    Info(commands::info::InfoArgs),

    /// Show the mode table at a sample rate
    Modes(commands::modes::ModesArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),

    /// List audio devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Realtime(args) => commands::realtime::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Modes(args) => commands::modes::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
