//! File-to-file processing with the colorer.

use tempfile::TempDir;
use tonix_colorer::{ColorType, ParamSnapshot, Tonix};
use tonix_core::{Effect, StreamLayout};
use tonix_io::{Error, PlanarBuffer, ProcessingEngine, WavSpec, read_wav, write_wav};

fn test_signal(channels: usize, frames: usize) -> PlanarBuffer {
    PlanarBuffer::from_channels(
        (0..channels)
            .map(|c| {
                (0..frames)
                    .map(|i| 0.6 * ((i as f32) * 0.02 * (c + 1) as f32).sin())
                    .collect()
            })
            .collect(),
    )
}

#[test]
fn block_size_does_not_change_result() {
    let input = test_signal(2, 3000);
    let params = ParamSnapshot {
        color: ColorType::Luster,
        process_percent: 85.0,
        input_trim_db: 3.0,
        ..ParamSnapshot::default()
    };

    let mut outputs = Vec::new();
    for block_size in [1, 64, 500, 4096] {
        let mut tonix = Tonix::new();
        tonix.set_params(params);
        let mut engine = ProcessingEngine::new(tonix);
        engine.prepare(48000.0, 2).unwrap();
        outputs.push(engine.process_file(&input, block_size, |_, _| {}));
    }
    for output in &outputs[1..] {
        assert_eq!(output, &outputs[0]);
    }
}

#[test]
fn engine_matches_direct_processing() {
    let input = test_signal(3, 1024);
    let mut direct = Tonix::with_layout(StreamLayout::symmetric(96000.0, 3)).unwrap();
    direct.set_process_percent(50.0);
    let mut expected = input.clone();
    direct.process_block(&mut expected.as_mut_slices());

    let mut tonix = Tonix::new();
    tonix.set_process_percent(50.0);
    let mut engine = ProcessingEngine::new(tonix);
    engine.prepare(96000.0, 3).unwrap();
    let output = engine.process_file(&input, 256, |_, _| {});

    assert_eq!(output, expected);
}

#[test]
fn wav_through_colorer() {
    let dir = TempDir::new().unwrap();
    let in_path = dir.path().join("in.wav");
    let out_path = dir.path().join("out.wav");

    let spec = WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 32,
    };
    write_wav(&in_path, &test_signal(2, 4410), spec).unwrap();

    let (input, in_spec) = read_wav(&in_path).unwrap();
    let mut tonix = Tonix::new();
    tonix.set_color(ColorType::DarkEssence);
    tonix.set_process_percent(100.0);
    let mut engine = ProcessingEngine::new(tonix);
    engine
        .prepare(f64::from(in_spec.sample_rate), input.channel_count())
        .unwrap();
    let output = engine.process_file(&input, 512, |_, _| {});
    write_wav(&out_path, &output, in_spec).unwrap();

    let (reloaded, out_spec) = read_wav(&out_path).unwrap();
    assert_eq!(out_spec, in_spec);
    assert_eq!(reloaded, output);
    assert_ne!(reloaded, input);
    assert!(reloaded.peak() < 2.0);
}

#[test]
fn low_sample_rate_is_rejected() {
    let mut engine = ProcessingEngine::new(Tonix::new());
    let err = engine.prepare(22050.0, 2).unwrap_err();
    assert!(matches!(err, Error::Layout(_)));
    assert!(err.to_string().contains("22050"));
}
