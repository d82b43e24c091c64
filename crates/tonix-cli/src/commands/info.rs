//! Display WAV file metadata and per-channel levels.

use clap::Args;
use tonix_core::{BASE_SAMPLE_RATE, linear_to_db};
use tonix_io::{PlanarBuffer, WavFormat, read_wav, read_wav_info};

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,

    /// Skip reading samples; print the header only
    #[arg(long)]
    pub header_only: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );
    if f64::from(info.sample_rate) < BASE_SAMPLE_RATE {
        println!("Note:        below {BASE_SAMPLE_RATE} Hz, tonix cannot color this file");
    }

    if args.header_only {
        return Ok(());
    }

    let (audio, _) = read_wav(&args.file)?;
    print_levels(&audio);

    Ok(())
}

fn print_levels(audio: &PlanarBuffer) {
    println!("\nLevels:");
    for (index, channel) in audio.channels().enumerate() {
        let single = PlanarBuffer::from_mono(channel.to_vec());
        println!(
            "  ch{index}: RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(f64::from(single.rms())),
            linear_to_db(f64::from(single.peak()))
        );
    }
}
