//! Real-time coloring command.
//!
//! Audio runs on the device callback; parameter changes typed on stdin are
//! published through [`SharedParams`] and picked up at the next block.

use super::common::{ToneArgs, format_value, parse_assignment};
use anyhow::Context;
use clap::Args;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tonix_colorer::params::PARAM_COUNT;
use tonix_colorer::{SharedParams, Tonix};
use tonix_core::{Effect, StreamLayout};
use tonix_io::{AudioStream, MAX_STREAM_CHANNELS, StreamConfig, default_device};

#[derive(Args)]
pub struct RealtimeArgs {
    #[command(flatten)]
    tone: ToneArgs,

    /// Input device (index, exact name, or partial name)
    #[arg(long)]
    input_device: Option<String>,

    /// Output device (index, exact name, or partial name)
    #[arg(long)]
    output_device: Option<String>,

    /// Number of processing channels (default: output device channels)
    #[arg(long)]
    channels: Option<usize>,
}

pub fn run(args: RealtimeArgs) -> anyhow::Result<()> {
    let tone = args.tone.resolve()?;

    let (default_input, default_output) = default_device()?;
    let input_name = args
        .input_device
        .clone()
        .or(default_input.map(|d| d.name))
        .unwrap_or_else(|| "none".to_string());
    let output_name = args
        .output_device
        .clone()
        .or(default_output.map(|d| d.name))
        .unwrap_or_else(|| "none".to_string());

    let mut stream = AudioStream::new(StreamConfig {
        input_device: args.input_device,
        output_device: args.output_device,
    })?;

    let sample_rate = stream.sample_rate()?;
    let channels = args
        .channels
        .unwrap_or_else(|| usize::from(stream.output_channels()).min(MAX_STREAM_CHANNELS));

    let mut tonix = Tonix::new();
    tone.apply(&mut tonix);
    tonix
        .prepare(StreamLayout::symmetric(f64::from(sample_rate), channels))
        .with_context(|| format!("cannot run at {sample_rate} Hz with {channels} channel(s)"))?;

    let shared = Arc::new(SharedParams::new());
    shared.store(&tone.params);

    if let Some(name) = &tone.preset_name {
        println!("Preset: {name}");
    }
    println!("Real-time coloring: {}", tone.summary());
    println!("  Input:       {input_name}");
    println!("  Output:      {output_name}");
    println!("  Sample rate: {sample_rate} Hz");
    println!("  Channels:    {channels}");
    println!("\nType key=value to change parameters (e.g. process=40, type=luster, bypass=on),");
    println!("'show' to print the current values. Press Ctrl+C to stop...\n");

    let stop = Arc::new(AtomicBool::new(false));
    let s = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        s.store(true, Ordering::SeqCst);
    })?;

    spawn_control_thread(Arc::clone(&shared));

    let audio_params = Arc::clone(&shared);
    stream.run_planar(
        channels,
        move |block| {
            tonix.set_params(audio_params.snapshot());
            tonix.process_block(block);
        },
        stop,
    )?;

    println!("Done!");
    Ok(())
}

/// Read parameter assignments from stdin until it closes.
fn spawn_control_thread(shared: Arc<SharedParams>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("show") {
                print_params(&shared);
                continue;
            }
            match parse_assignment(line) {
                Ok((index, value)) => {
                    shared.set(index, value);
                    tracing::info!(index, value = %format_value(index, value), "parameter changed");
                }
                Err(e) => eprintln!("{e:#}"),
            }
        }
    });
}

fn print_params(shared: &SharedParams) {
    for index in 0..PARAM_COUNT {
        if let Some(desc) = tonix_colorer::params::descriptor(index) {
            println!(
                "  {:12} {}",
                desc.string_id,
                format_value(index, shared.get(index))
            );
        }
    }
}
