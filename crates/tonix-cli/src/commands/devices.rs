//! `tonix devices`: what the audio host offers.

use clap::{Args, Subcommand};
use tonix_core::BASE_SAMPLE_RATE;
use tonix_io::{AudioDevice, default_device, list_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// Every input and output device, numbered for --input-device/--output-device
    List,

    /// The host's default devices
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command {
        None | Some(DevicesCommand::List) => list(),
        Some(DevicesCommand::Info) => defaults(),
    }
}

fn list() -> anyhow::Result<()> {
    let devices = list_devices()?;
    if devices.is_empty() {
        println!("No audio devices found.");
        return Ok(());
    }

    let (inputs, outputs): (Vec<&AudioDevice>, Vec<&AudioDevice>) = (
        devices.iter().filter(|d| d.is_input).collect(),
        devices.iter().filter(|d| d.is_output).collect(),
    );
    print_numbered("Inputs", &inputs);
    print_numbered("Outputs", &outputs);

    println!("{} input(s), {} output(s)", inputs.len(), outputs.len());
    println!();
    println!("Pick devices by number or by part of the name:");
    println!("  tonix realtime --input-device 0 --output-device 1 --process 40");
    println!("  tonix realtime --output-device usb --type luster");
    Ok(())
}

fn print_numbered(heading: &str, devices: &[&AudioDevice]) {
    if devices.is_empty() {
        return;
    }
    println!("{heading}:");
    for (number, device) in devices.iter().enumerate() {
        let too_slow = f64::from(device.default_sample_rate) < BASE_SAMPLE_RATE;
        println!(
            "  [{number}] {} @ {} Hz{}",
            device.name,
            device.default_sample_rate,
            if too_slow { " (below 44.1 kHz, unusable)" } else { "" }
        );
    }
    println!();
}

fn defaults() -> anyhow::Result<()> {
    let (input, output) = default_device()?;
    for (role, device) in [("input", input), ("output", output)] {
        match device {
            Some(d) => println!("Default {role}: {} @ {} Hz", d.name, d.default_sample_rate),
            None => println!("Default {role}: none"),
        }
    }
    Ok(())
}
