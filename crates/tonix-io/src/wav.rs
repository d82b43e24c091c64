//! WAV files as planar `f32` buffers.
//!
//! Any channel count is accepted. Reading takes 16/24/32-bit integer PCM or
//! 32-bit float; writing produces 16 or 24-bit PCM, or 32-bit float.

use crate::{Error, PlanarBuffer, Result};
use hound::{Sample, SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Sample encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Integer PCM.
    Pcm,
    /// 32-bit IEEE float.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Int => Self::Pcm,
            SampleFormat::Float => Self::IeeeFloat,
        }
    }
}

/// Header facts about a WAV file.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bits per stored sample.
    pub bits_per_sample: u16,
    /// Frames in the file.
    pub num_frames: u64,
    /// `num_frames / sample_rate`.
    pub duration_secs: f64,
    /// Sample encoding.
    pub format: WavFormat,
}

fn open(path: &Path) -> Result<WavReader<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(WavReader::new(BufReader::new(file))?)
}

/// Reads a WAV header without decoding samples.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = open(path.as_ref())?;
    let header = reader.spec();
    let num_frames = u64::from(reader.duration());
    Ok(WavInfo {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(header.sample_rate),
        format: header.sample_format.into(),
    })
}

/// Layout of a WAV file to write, or of one that was read.
///
/// The encoding follows from the depth: 32 bits is float, 16 and 24 bits
/// are integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Channel count. [`write_wav`] takes it from the buffer instead.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// 16, 24 or 32.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    fn to_hound(self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: if self.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Largest integer magnitude plus one for a PCM depth.
fn full_scale(bits: u16) -> f32 {
    (1_u32 << (bits - 1)) as f32
}

fn decode<R: Read, S: Sample>(
    reader: WavReader<R>,
    to_f32: impl Fn(S) -> f32,
) -> Result<Vec<f32>> {
    reader
        .into_samples::<S>()
        .map(|s| s.map(&to_f32).map_err(Error::from))
        .collect()
}

/// Loads every channel of a WAV file. Integer PCM is scaled into `[-1, 1)`.
///
/// ```ignore
/// let (audio, spec) = tonix_io::read_wav("take.wav")?;
/// assert_eq!(audio.channel_count(), usize::from(spec.channels));
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(PlanarBuffer, WavSpec)> {
    let reader = open(path.as_ref())?;
    let header = reader.spec();
    let spec = WavSpec {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
    };

    let interleaved = match header.sample_format {
        SampleFormat::Float => decode(reader, |s: f32| s)?,
        SampleFormat::Int => {
            let scale = full_scale(header.bits_per_sample);
            decode(reader, |s: i32| s as f32 / scale)?
        }
    };

    let audio = PlanarBuffer::from_interleaved(&interleaved, usize::from(spec.channels));
    tracing::debug!(
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = audio.frames(),
        "read wav"
    );
    Ok((audio, spec))
}

/// Saves `audio` with the rate and depth of `spec`.
///
/// Integer output is clipped to full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &PlanarBuffer, spec: WavSpec) -> Result<()> {
    let bits = spec.bits_per_sample;
    if !matches!(bits, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{bits}-bit output (use 16, 24 or 32)"
        )));
    }
    let channels = match u16::try_from(audio.channel_count()) {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(Error::UnsupportedFormat(format!(
                "{} channels",
                audio.channel_count()
            )));
        }
    };

    let spec = WavSpec { channels, ..spec };
    let mut writer = WavWriter::create(path, spec.to_hound())?;
    let scale = full_scale(bits);
    for sample in audio.to_interleaved() {
        if bits == 32 {
            writer.write_sample(sample)?;
        } else {
            let clipped = (sample * scale).clamp(-scale, scale - 1.0);
            writer.write_sample(clipped as i32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
