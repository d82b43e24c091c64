//! Print the mode table with edges scaled for a sample rate.

use anyhow::Context;
use clap::Args;
use tonix_colorer::{Brightness, ColorType, Compatibility, lookup_with, sample_rate_scale};
use tonix_core::{StreamLayout, Waveshaper};

#[derive(Args)]
pub struct ModesArgs {
    /// Sample rate in Hz used to scale the filter edges
    #[arg(long, default_value = "44100")]
    sample_rate: f64,

    /// Show the first-release (legacy) coefficient rows
    #[arg(long)]
    legacy: bool,
}

pub fn run(args: ModesArgs) -> anyhow::Result<()> {
    StreamLayout::symmetric(args.sample_rate, 1)
        .validate()
        .with_context(|| format!("sample rate {} Hz", args.sample_rate))?;

    let scale = sample_rate_scale(args.sample_rate);
    let compatibility = if args.legacy {
        Compatibility::Legacy
    } else {
        Compatibility::Corrected
    };

    println!(
        "Mode table at {} Hz (edge scale {scale}, {})",
        args.sample_rate,
        compatibility.name()
    );
    println!();
    println!(
        "  {:13} {:9} {:>10} {:>10} {:>6} {:>7} {:>10} {:>9} {:>5} {:>8} {:>7} {:>6}",
        "Type", "Bright", "high", "low", "a3", "f1", "p20", "p24", "gate", "shaper", "a1", "a2"
    );

    for color in ColorType::ALL {
        for brightness in Brightness::ALL {
            let c = lookup_with(color, brightness, compatibility).scaled(scale);
            println!(
                concat!(
                    "  {:13} {:9} {:>10.6} {:>10.6} {:>6.4} {:>7.4}",
                    " {:>10.8} {:>9.7} {:>5} {:>8} {:>7.3} {:>6.3}"
                ),
                color.name(),
                brightness.name(),
                c.high_edge,
                c.low_edge,
                c.a3,
                c.f1,
                c.p20,
                c.p24,
                if c.gate { "on" } else { "off" },
                shaper_name(c.waveshaper),
                c.gain_a1,
                c.gain_a2
            );
        }
    }

    Ok(())
}

fn shaper_name(shaper: Waveshaper) -> &'static str {
    match shaper {
        Waveshaper::Luminous => "luminous",
        Waveshaper::Radiant => "radiant",
        Waveshaper::Dark => "dark",
    }
}
