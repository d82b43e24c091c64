//! End-to-end scenarios through the block driver.

use tonix_colorer::{
    Brightness, Channel, ColorType, Compatibility, ModeCoefficients, ParamSnapshot, Tonix,
    lookup_with, sample_rate_scale,
};
use tonix_core::{Effect, LayoutError, StreamLayout};

/// Straight-line rendition of the first release's per-channel transform.
///
/// Only the state lives here; coefficients come from the table. Integrator
/// state is flushed the way a flush-to-zero FPU would.
struct ReferenceChannel {
    c: ModeCoefficients,
    luster: bool,
    processing: f64,
    auto_gain: f64,
    use_auto_gain: bool,
    prev_x: f64,
    s: f64,
}

impl ReferenceChannel {
    fn new(c: ModeCoefficients, color: ColorType, processing: f64, use_auto_gain: bool) -> Self {
        Self {
            c,
            luster: color == ColorType::Luster,
            processing,
            auto_gain: 1.0 + processing * c.gain_a1 + processing * processing * c.gain_a2,
            use_auto_gain,
            prev_x: 0.0,
            s: 0.0,
        }
    }

    fn process(&mut self, x: f64) -> f64 {
        let c = self.c;
        let cur = self.processing * c.a3;
        let x1 = c.high_edge * x + (x - self.prev_x);
        let x2 = x1 * c.f1 + x1;
        let x3 = if c.gate { x2 } else { x };
        let x4 = if self.luster {
            c.waveshaper.process(x2 * cur)
        } else {
            c.waveshaper.process(x2)
        };
        let x5 = c.waveshaper.process(x4 * cur * c.p20 + x3);
        self.prev_x = x;
        self.s += (x5 - self.s) * c.low_edge;
        if self.s.abs() < f64::MIN_POSITIVE {
            self.s = 0.0;
        }
        let mut y = cur * (self.s - x * c.p24);
        if self.luster {
            y *= 0.5;
        }
        y += x;
        if self.use_auto_gain {
            y *= self.auto_gain;
        }
        y
    }

    /// One block with single-precision trims, as the first release ran it.
    fn process_block(&mut self, block: &mut [f32], input_trim_db: f32, output_trim_db: f32) {
        let input_gain = libm::powf(10.0, input_trim_db * 0.05);
        let output_gain = libm::powf(10.0, output_trim_db * 0.05);
        for sample in block {
            let y = self.process(f64::from(*sample * input_gain));
            *sample = (y * f64::from(output_gain)) as f32;
        }
    }
}

/// Burst of tone followed by enough silence for the integrator to reach
/// the subnormal range.
fn burst_then_silence(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| if i < 256 { 0.8 * (i as f32 * 0.11).sin() } else { 0.0 })
        .collect()
}

fn impulse(len: usize) -> Vec<f32> {
    let mut buf = vec![0.0; len];
    buf[0] = 1.0;
    buf
}

#[test]
fn impulse_passes_dry_at_zero_process() {
    let mut tonix = Tonix::with_layout(StreamLayout::symmetric(44100.0, 1)).unwrap();
    tonix.set_params(ParamSnapshot {
        color: ColorType::Luminiscent,
        brightness: Brightness::Opal,
        process_percent: 0.0,
        auto_gain: false,
        ..ParamSnapshot::default()
    });

    let mut buf = impulse(64);
    tonix.process_block(&mut [&mut buf[..]]);
    assert_eq!(buf, impulse(64));
    // Memory still advanced even though the output is dry.
    assert!(tonix.channels()[0].integrator_state() != 0.0);
}

#[test]
fn silence_after_excitation_decays_for_every_mode() {
    for compatibility in [Compatibility::Corrected, Compatibility::Legacy] {
        for color in ColorType::ALL {
            for brightness in Brightness::ALL {
                let mut tonix =
                    Tonix::with_layout(StreamLayout::symmetric(96000.0, 1)).unwrap();
                tonix.set_compatibility(compatibility);
                tonix.set_params(ParamSnapshot {
                    color,
                    brightness,
                    process_percent: 100.0,
                    ..ParamSnapshot::default()
                });

                let mut buf = impulse(512);
                tonix.process_block(&mut [&mut buf[..]]);
                let mut tail = vec![0.0_f32; 512];
                for _ in 0..64 {
                    tail.fill(0.0);
                    tonix.process_block(&mut [&mut tail[..]]);
                }
                assert!(
                    tail.iter().all(|s| s.abs() < 1e-9),
                    "{compatibility:?} {color:?}/{brightness:?} did not settle"
                );
            }
        }
    }
}

#[test]
fn processing_colors_the_signal() {
    let mut outputs = Vec::new();
    for color in ColorType::ALL {
        let mut tonix = Tonix::with_layout(StreamLayout::symmetric(44100.0, 1)).unwrap();
        tonix.set_color(color);
        tonix.set_process_percent(100.0);
        tonix.set_auto_gain(false);
        let mut buf: Vec<f32> = (0..256).map(|i| 0.7 * (i as f32 * 0.03).sin()).collect();
        let dry = buf.clone();
        tonix.process_block(&mut [&mut buf[..]]);
        assert_ne!(buf, dry, "{color:?}");
        outputs.push(buf);
    }
    for i in 0..outputs.len() {
        for j in (i + 1)..outputs.len() {
            assert_ne!(outputs[i], outputs[j], "types {i} and {j} sound identical");
        }
    }
}

#[test]
fn sample_rate_scale_steps() {
    assert_eq!(sample_rate_scale(44100.0), 1.0);
    assert_eq!(sample_rate_scale(88200.0), 0.5);
    assert_eq!(sample_rate_scale(96000.0), 0.5);
    assert_eq!(sample_rate_scale(132300.0), 1.0 / 3.0);
}

#[test]
fn configuration_rejections() {
    let mut tonix = Tonix::new();
    assert_eq!(
        tonix.prepare(StreamLayout::new(48000.0, 2, 1)),
        Err(LayoutError::AsymmetricChannels {
            inputs: 2,
            outputs: 1
        })
    );
    assert_eq!(
        tonix.prepare(StreamLayout::symmetric(48000.0, 0)),
        Err(LayoutError::NoChannels)
    );
    assert_eq!(
        tonix.prepare(StreamLayout::symmetric(22050.0, 2)),
        Err(LayoutError::InvalidSampleRate(22050.0))
    );
    assert!(tonix.channels().is_empty());
}

#[test]
fn legacy_matches_first_release_sample_for_sample() {
    let cases = [
        (ColorType::DarkEssence, Brightness::Gold, 100.0, 0.0, 0.0, 44100.0),
        (ColorType::DarkEssence, Brightness::Gold, 37.0, 3.3, -1.7, 44100.0),
        (ColorType::Luster, Brightness::Opal, 100.0, 0.0, 0.0, 44100.0),
        (ColorType::Luster, Brightness::Opal, 37.0, 3.3, -1.7, 96000.0),
        (ColorType::Radiant, Brightness::Sapphire, 0.4, -9.5, 5.5, 48000.0),
        (ColorType::Luminiscent, Brightness::Opal, 62.5, 10.0, -6.0, 44100.0),
    ];
    const BLOCK: usize = 256;

    for (color, brightness, process, input_trim_db, output_trim_db, sample_rate) in cases {
        let mut tonix = Tonix::with_layout(StreamLayout::symmetric(sample_rate, 1)).unwrap();
        tonix.set_compatibility(Compatibility::Legacy);
        tonix.set_params(ParamSnapshot {
            color,
            brightness,
            process_percent: process,
            input_trim_db,
            output_trim_db,
            // Ignored under Legacy; auto-gain follows the process amount.
            auto_gain: false,
            ..ParamSnapshot::default()
        });

        let coefficients = lookup_with(color, brightness, Compatibility::Legacy)
            .scaled(sample_rate_scale(sample_rate));
        let mut reference = ReferenceChannel::new(
            coefficients,
            color,
            f64::from(process) / 100.0,
            process > 0.5,
        );

        let mut got = burst_then_silence(16 * 1024);
        let mut want = got.clone();
        for (g, w) in got.chunks_mut(BLOCK).zip(want.chunks_mut(BLOCK)) {
            tonix.process_block(&mut [g]);
            reference.process_block(w, input_trim_db, output_trim_db);
        }

        for (i, (g, w)) in got.iter().zip(&want).enumerate() {
            assert_eq!(
                g, w,
                "{color:?}/{brightness:?} at {process}% diverged at sample {i}"
            );
        }
        assert!(got[300..].iter().any(|s| *s != 0.0), "{color:?} tail was silent");
        assert_eq!(tonix.channels()[0].integrator_state(), reference.s);
    }
}

#[test]
fn channel_tracks_reference_over_many_samples() {
    let input: Vec<f64> = (0..64)
        .map(|i| {
            let t = f64::from(i);
            0.8 * (t * 0.37).sin() + 0.3 * (t * 1.9).cos()
        })
        .collect();
    let modes = [
        (ColorType::Luminiscent, Brightness::Opal),
        (ColorType::Iridescent, Brightness::Sapphire),
        (ColorType::Radiant, Brightness::Gold),
        (ColorType::Luster, Brightness::Sapphire),
        (ColorType::DarkEssence, Brightness::Opal),
    ];

    for scale in [1.0, 0.5] {
        for (color, brightness) in modes {
            let mut channel = Channel::new(scale);
            channel.set_mode(color, brightness);
            channel.set_processing_amount(0.65);
            channel.set_auto_gain_enabled(true);

            let coefficients =
                lookup_with(color, brightness, Compatibility::Corrected).scaled(scale);
            let mut reference = ReferenceChannel::new(coefficients, color, 0.65, true);

            for (i, &x) in input.iter().enumerate() {
                let got = channel.process(x);
                let want = reference.process(x);
                assert!(
                    (got - want).abs() <= 1e-12,
                    "{color:?}/{brightness:?} at scale {scale}, sample {i}: {got} vs {want}"
                );
            }
            assert!((channel.integrator_state() - reference.s).abs() <= 1e-12);
            assert_eq!(channel.previous_input(), input[63]);
        }
    }
}
