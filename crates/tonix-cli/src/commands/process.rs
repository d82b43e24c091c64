//! File-based coloring command.

use super::common::ToneArgs;
use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tonix_colorer::Tonix;
use tonix_core::linear_to_db;
use tonix_io::{PlanarBuffer, ProcessingEngine, WavSpec, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    tone: ToneArgs,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        bail!("--block-size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        bail!("--bit-depth must be 16, 24, or 32 (got {})", args.bit_depth);
    }

    let tone = args.tone.resolve()?;

    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        input.channel_count(),
        input.frames(),
        spec.sample_rate,
        input.frames() as f64 / f64::from(spec.sample_rate)
    );

    let mut tonix = Tonix::new();
    tone.apply(&mut tonix);

    let mut engine = ProcessingEngine::new(tonix);
    engine
        .prepare(f64::from(spec.sample_rate), input.channel_count())
        .with_context(|| format!("cannot color {}", args.input.display()))?;

    if let Some(name) = &tone.preset_name {
        println!("Preset: {name}");
    }
    println!("Coloring: {}", tone.summary());

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(input.frames() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = engine.process_file(&input, args.block_size, |done, _| {
        pb.set_position(done as u64);
    });
    pb.finish_with_message("done");

    print_stats(&input, &output);

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

fn print_stats(input: &PlanarBuffer, output: &PlanarBuffer) {
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(f64::from(input.rms())),
        linear_to_db(f64::from(input.peak()))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(f64::from(output.rms())),
        linear_to_db(f64::from(output.peak()))
    );
}
