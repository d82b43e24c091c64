//! Audio I/O layer for the tonix tape colorer.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] load and save every
//!   channel of a file as a [`PlanarBuffer`]
//! - **Offline processing**: [`ProcessingEngine`] drives any
//!   [`Effect`](tonix_core::Effect) over a whole buffer in fixed-size blocks
//! - **Real-time streaming**: [`AudioStream`] for live input through output
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tonix_colorer::Tonix;
//! use tonix_io::{ProcessingEngine, read_wav, write_wav};
//!
//! let (input, spec) = read_wav("input.wav")?;
//!
//! let mut engine = ProcessingEngine::new(Tonix::new());
//! engine.prepare(f64::from(spec.sample_rate), input.channel_count())?;
//! let output = engine.process_file(&input, 512, |_, _| {});
//!
//! write_wav("output.wav", &output, spec)?;
//! ```

mod buffer;
mod engine;
mod stream;
mod wav;

pub use buffer::PlanarBuffer;
pub use engine::ProcessingEngine;
pub use stream::{
    AudioDevice, AudioStream, MAX_STREAM_CHANNELS, StreamConfig, default_device, list_devices,
};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

use tonix_core::LayoutError;

/// Failures from file, device and stream handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Decoding or encoding a WAV file failed.
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),

    /// The host refused to build, start or configure a stream.
    #[error("stream: {0}")]
    Stream(String),

    /// The host has no default device for a direction.
    #[error("no audio device available")]
    NoDevice,

    /// A depth, channel count or similar request cannot be met.
    #[error("unsupported: {0}")]
    UnsupportedFormat(String),

    /// A device selector matched nothing.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// The processor rejected the stream layout.
    #[error("layout rejected: {0}")]
    Layout(#[from] LayoutError),

    /// A file could not be opened.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
