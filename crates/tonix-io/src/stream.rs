//! Live device I/O through cpal.
//!
//! [`AudioStream`] pairs one input and one output device and hands the
//! processor planar blocks from the output callback. Input frames cross from
//! the input callback over a lock-free ring; the output callback
//! deinterleaves them into scratch that is sized before the stream starts.
//! Neither callback allocates.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream, SupportedStreamConfig};
use rtrb::{Consumer, Producer, RingBuffer};
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Most planar channels a stream hands to the processor.
pub const MAX_STREAM_CHANNELS: usize = 8;

const SCRATCH_FRAMES: usize = 8192;
/// Captured frames held back before the oldest are dropped.
const MAX_BACKLOG_FRAMES: usize = 4096;
/// Capture ring size in frames.
const RING_FRAMES: usize = 2 * SCRATCH_FRAMES;
const FALLBACK_SAMPLE_RATE: u32 = 48_000;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which side of a stream a device serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Capture.
    Input,
    /// Playback.
    Output,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }

    fn devices(self, host: &Host) -> Result<Vec<Device>> {
        let devices: std::result::Result<Vec<Device>, cpal::DevicesError> = match self {
            Self::Input => host.input_devices().map(Iterator::collect),
            Self::Output => host.output_devices().map(Iterator::collect),
        };
        devices.map_err(stream_error)
    }

    fn default_device(self, host: &Host) -> Option<Device> {
        match self {
            Self::Input => host.default_input_device(),
            Self::Output => host.default_output_device(),
        }
    }

    fn config(self, device: &Device) -> Result<SupportedStreamConfig> {
        let config = match self {
            Self::Input => device.default_input_config(),
            Self::Output => device.default_output_config(),
        };
        config.map_err(stream_error)
    }
}

/// A device as shown to the user.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Name reported by the host.
    pub name: String,
    /// Can capture.
    pub is_input: bool,
    /// Can play back.
    pub is_output: bool,
    /// Rate of the device's default configuration in Hz.
    pub default_sample_rate: u32,
}

impl AudioDevice {
    fn describe(device: &Device, direction: Direction) -> Option<Self> {
        let name = device_name(device)?;
        let default_sample_rate = direction
            .config(device)
            .map_or(FALLBACK_SAMPLE_RATE, |c| c.sample_rate());
        Some(Self {
            name,
            is_input: direction == Direction::Input,
            is_output: direction == Direction::Output,
            default_sample_rate,
        })
    }
}

/// Device selection for [`AudioStream::new`]. `None` picks the host default.
///
/// A selector is either a zero-based index into the host's device list for
/// that direction, an exact name, or a case-insensitive name fragment.
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Capture device selector.
    pub input_device: Option<String>,
    /// Playback device selector.
    pub output_device: Option<String>,
}

/// Every device the default host reports. Duplex devices appear once, as
/// inputs with `is_output` set.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut found: Vec<AudioDevice> = Vec::new();

    for device in Direction::Input.devices(&host).unwrap_or_default() {
        if let Some(mut entry) = AudioDevice::describe(&device, Direction::Input) {
            entry.is_output = device.default_output_config().is_ok();
            found.push(entry);
        }
    }
    for device in Direction::Output.devices(&host).unwrap_or_default() {
        if let Some(entry) = AudioDevice::describe(&device, Direction::Output)
            && !found.iter().any(|d| d.name == entry.name)
        {
            found.push(entry);
        }
    }

    Ok(found)
}

/// The host's default input and output devices.
pub fn default_device() -> Result<(Option<AudioDevice>, Option<AudioDevice>)> {
    let host = cpal::default_host();
    let describe_default = |direction: Direction| {
        direction
            .default_device(&host)
            .and_then(|d| AudioDevice::describe(&d, direction))
    };
    Ok((
        describe_default(Direction::Input),
        describe_default(Direction::Output),
    ))
}

/// Live input-to-output stream feeding a planar block processor.
pub struct AudioStream {
    input: Device,
    output: Device,
    running: Arc<AtomicBool>,
    streams: Option<(Stream, Stream)>,
}

impl AudioStream {
    /// Opens the selected devices, or the host defaults.
    pub fn new(config: StreamConfig) -> Result<Self> {
        let host = cpal::default_host();
        let input = open_device(&host, Direction::Input, config.input_device.as_deref())?;
        let output = open_device(&host, Direction::Output, config.output_device.as_deref())?;

        tracing::info!(
            input = %device_name(&input).unwrap_or_default(),
            output = %device_name(&output).unwrap_or_default(),
            "audio devices opened"
        );

        Ok(Self {
            input,
            output,
            running: Arc::new(AtomicBool::new(false)),
            streams: None,
        })
    }

    /// Rate the output device runs at.
    pub fn sample_rate(&self) -> Result<u32> {
        Ok(Direction::Output.config(&self.output)?.sample_rate())
    }

    /// Output device channel count, 2 if unknown.
    pub fn output_channels(&self) -> u16 {
        Direction::Output
            .config(&self.output)
            .map_or(2, |c| c.channels())
    }

    /// Runs the devices until `stop` is set, handing `channels` planar
    /// buffers to `process` on every output callback.
    ///
    /// Mono input feeds every planar channel and surplus input channels are
    /// dropped. A single planar channel is copied to every output channel;
    /// otherwise output channels past `channels` are silent. The callback
    /// outputs silence while not enough input has arrived, and drops the
    /// oldest captured frames once more than a short backlog has queued up.
    ///
    /// Fails with [`Error::UnsupportedFormat`] when the two devices run at
    /// different rates.
    pub fn run_planar<F>(
        &mut self,
        channels: usize,
        mut process: F,
        stop: Arc<AtomicBool>,
    ) -> Result<()>
    where
        F: FnMut(&mut [&mut [f32]]) + Send + 'static,
    {
        if !(1..=MAX_STREAM_CHANNELS).contains(&channels) {
            return Err(Error::UnsupportedFormat(format!(
                "{channels} processing channels (1..={MAX_STREAM_CHANNELS})"
            )));
        }

        let input_config = Direction::Input.config(&self.input)?;
        let output_config = Direction::Output.config(&self.output)?;
        if input_config.sample_rate() != output_config.sample_rate() {
            return Err(Error::UnsupportedFormat(format!(
                "input at {} Hz with output at {} Hz (rates must match)",
                input_config.sample_rate(),
                output_config.sample_rate()
            )));
        }
        let input_channels = usize::from(input_config.channels());
        let output_channels = usize::from(output_config.channels());

        let (mut producer, consumer) = RingBuffer::<f32>::new(RING_FRAMES * input_channels);
        let mut capture = CaptureReader::new(consumer, input_channels, MAX_BACKLOG_FRAMES);
        self.running.store(true, Ordering::SeqCst);

        let capturing = Arc::clone(&self.running);
        let input_stream = self
            .input
            .build_input_stream(
                &input_config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if capturing.load(Ordering::SeqCst) {
                        push_frames(&mut producer, data, input_channels);
                    }
                },
                |err| tracing::warn!("input stream error: {err}"),
                None,
            )
            .map_err(stream_error)?;

        let playing = Arc::clone(&self.running);
        let mut planar: Vec<Vec<f32>> = vec![vec![0.0; SCRATCH_FRAMES]; channels];

        let output_stream = self
            .output
            .build_output_stream(
                &output_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !playing.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }
                    for out in data.chunks_mut(SCRATCH_FRAMES * output_channels) {
                        let frames = out.len() / output_channels;
                        let Some(captured) = capture.read(frames) else {
                            out.fill(0.0);
                            continue;
                        };
                        deinterleave_into(captured, input_channels, &mut planar, frames);

                        let mut block: [&mut [f32]; MAX_STREAM_CHANNELS] = Default::default();
                        for (slot, ch) in block.iter_mut().zip(planar.iter_mut()) {
                            *slot = &mut ch[..frames];
                        }
                        process(&mut block[..channels]);

                        interleave_into(&planar, frames, out, output_channels);
                    }
                },
                |err| tracing::warn!("output stream error: {err}"),
                None,
            )
            .map_err(stream_error)?;

        input_stream.play().map_err(stream_error)?;
        output_stream.play().map_err(stream_error)?;
        self.streams = Some((input_stream, output_stream));
        tracing::info!(channels, input_channels, output_channels, "stream running");

        while self.is_running() && !stop.load(Ordering::SeqCst) {
            std::thread::sleep(POLL_INTERVAL);
        }

        self.stop();
        self.streams = None;
        tracing::info!("stream stopped");
        Ok(())
    }

    /// Asks a running [`run_planar`](Self::run_planar) to return.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the stream is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

fn stream_error(err: impl Display) -> Error {
    Error::Stream(err.to_string())
}

fn device_name(device: &Device) -> Option<String> {
    device.description().ok().map(|d| d.name().to_string())
}

fn open_device(host: &Host, direction: Direction, selector: Option<&str>) -> Result<Device> {
    match selector {
        Some(selector) => select_device(direction.devices(host)?, selector, direction),
        None => direction.default_device(host).ok_or(Error::NoDevice),
    }
}

/// Picks a device by index, then exact name, then unique-or-first fragment.
fn select_device(devices: Vec<Device>, selector: &str, direction: Direction) -> Result<Device> {
    let kind = direction.label();

    if let Ok(index) = selector.parse::<usize>() {
        let count = devices.len();
        return devices.into_iter().nth(index).ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "{kind} device index {index} (only {count} devices available)"
            ))
        });
    }

    let named: Vec<(Device, String)> = devices
        .into_iter()
        .filter_map(|d| device_name(&d).map(|name| (d, name)))
        .collect();

    if let Some((device, _)) = named.iter().find(|(_, name)| name == selector) {
        return Ok(device.clone());
    }

    let needle = selector.to_lowercase();
    let mut candidates: Vec<(Device, String)> = named
        .into_iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .collect();

    if candidates.len() > 1 {
        let names: Vec<&str> = candidates.iter().map(|(_, n)| n.as_str()).collect();
        tracing::warn!(
            "'{selector}' matches several {kind} devices {names:?}, using '{}'",
            names[0]
        );
    }
    if candidates.is_empty() {
        return Err(Error::DeviceNotFound(format!(
            "no {kind} device matching '{selector}'"
        )));
    }
    Ok(candidates.swap_remove(0).0)
}

/// Queues the whole frames of `data` that fit in the ring and drops the rest.
/// Returns the number of samples queued.
fn push_frames(producer: &mut Producer<f32>, data: &[f32], channels: usize) -> usize {
    let room = producer.slots() / channels * channels;
    let count = (data.len() / channels * channels).min(room);
    for &sample in &data[..count] {
        let _ = producer.push(sample);
    }
    count
}

/// Output-side view of the capture ring.
///
/// Reads whole interleaved blocks into preallocated scratch and keeps the
/// queued backlog at or below `max_backlog` samples.
struct CaptureReader {
    consumer: Consumer<f32>,
    channels: usize,
    max_backlog: usize,
    scratch: Vec<f32>,
}

impl CaptureReader {
    fn new(consumer: Consumer<f32>, channels: usize, max_backlog_frames: usize) -> Self {
        Self {
            consumer,
            channels,
            max_backlog: max_backlog_frames * channels,
            scratch: vec![0.0; SCRATCH_FRAMES * channels],
        }
    }

    /// The next `frames` interleaved frames (at most [`SCRATCH_FRAMES`]), or
    /// `None` while fewer have arrived.
    fn read(&mut self, frames: usize) -> Option<&[f32]> {
        let excess = self.consumer.slots().saturating_sub(self.max_backlog);
        for _ in 0..excess {
            let _ = self.consumer.pop();
        }

        let wanted = frames.min(SCRATCH_FRAMES) * self.channels;
        if self.consumer.slots() < wanted {
            return None;
        }
        for slot in &mut self.scratch[..wanted] {
            *slot = self.consumer.pop().unwrap_or(0.0);
        }
        Some(&self.scratch[..wanted])
    }
}

/// Splits `frames` interleaved frames into the planar scratch.
///
/// Planar channel `c` reads input channel `c`. Mono input feeds every
/// channel; planar channels with no matching input are zeroed.
fn deinterleave_into(
    interleaved: &[f32],
    input_channels: usize,
    planar: &mut [Vec<f32>],
    frames: usize,
) {
    for (c, channel) in planar.iter_mut().enumerate() {
        let dst = &mut channel[..frames];
        let source = if input_channels == 1 { 0 } else { c };
        if source >= input_channels {
            dst.fill(0.0);
            continue;
        }
        for (out, frame) in dst.iter_mut().zip(interleaved.chunks_exact(input_channels)) {
            *out = frame[source];
        }
    }
}

/// Writes `frames` planar frames into an interleaved device buffer.
fn interleave_into(planar: &[Vec<f32>], frames: usize, output: &mut [f32], output_channels: usize) {
    let mono = planar.len() == 1;
    for (i, frame) in output.chunks_exact_mut(output_channels).take(frames).enumerate() {
        for (o, out) in frame.iter_mut().enumerate() {
            let source = if mono { planar.first() } else { planar.get(o) };
            *out = source.map_or(0.0, |ch| ch[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_queries_do_not_fail() {
        // Hosts without audio hardware report empty lists rather than errors.
        assert!(list_devices().is_ok());
        assert!(default_device().is_ok());
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::Input.label(), "input");
        assert_eq!(Direction::Output.label(), "output");
    }

    #[test]
    fn test_capture_waits_for_a_whole_block() {
        let (mut producer, consumer) = RingBuffer::<f32>::new(64);
        let mut capture = CaptureReader::new(consumer, 2, 16);

        assert_eq!(push_frames(&mut producer, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2), 6);
        assert!(capture.read(4).is_none());

        push_frames(&mut producer, &[7.0, 8.0], 2);
        assert_eq!(capture.read(4), Some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0][..]));
        assert!(capture.read(1).is_none());
    }

    #[test]
    fn test_capture_backlog_is_capped() {
        let (mut producer, consumer) = RingBuffer::<f32>::new(64);
        let mut capture = CaptureReader::new(consumer, 2, 4);

        let ten_frames: Vec<f32> = (0..20).map(|i| i as f32).collect();
        push_frames(&mut producer, &ten_frames, 2);

        // Six oldest frames are dropped; reading resumes at frame 6.
        assert_eq!(capture.read(2), Some(&[12.0, 13.0, 14.0, 15.0][..]));
        assert_eq!(capture.read(2), Some(&[16.0, 17.0, 18.0, 19.0][..]));
        assert!(capture.read(1).is_none());
    }

    #[test]
    fn test_full_ring_keeps_frames_whole() {
        let (mut producer, consumer) = RingBuffer::<f32>::new(5);
        let mut capture = CaptureReader::new(consumer, 2, 8);

        assert_eq!(push_frames(&mut producer, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 2), 4);
        assert_eq!(push_frames(&mut producer, &[9.0, 10.0], 2), 0);
        assert_eq!(capture.read(2), Some(&[1.0, 2.0, 3.0, 4.0][..]));

        assert_eq!(push_frames(&mut producer, &[9.0, 10.0], 2), 2);
        assert_eq!(capture.read(1), Some(&[9.0, 10.0][..]));
    }

    #[test]
    fn test_deinterleave_three_channels() {
        let mut planar = vec![vec![9.0; 3]; 3];
        deinterleave_into(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, &mut planar, 2);
        assert_eq!(planar[0], [1.0, 4.0, 9.0]);
        assert_eq!(planar[1], [2.0, 5.0, 9.0]);
        assert_eq!(planar[2], [3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_deinterleave_mono_fans_out() {
        let mut planar = vec![vec![0.0; 3]; 4];
        deinterleave_into(&[0.25, -0.25, 0.5], 1, &mut planar, 3);
        assert!(planar.iter().all(|ch| ch[..] == [0.25, -0.25, 0.5]));
    }

    #[test]
    fn test_deinterleave_pads_and_drops_channels() {
        let mut wide = vec![vec![7.0; 2]; 4];
        deinterleave_into(&[1.0, 2.0, 3.0, 4.0], 2, &mut wide, 2);
        assert_eq!(wide[1][..], [2.0, 4.0]);
        assert_eq!(wide[2][..], [0.0, 0.0]);
        assert_eq!(wide[3][..], [0.0, 0.0]);

        let mut narrow = vec![vec![0.0; 2]];
        deinterleave_into(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, &mut narrow, 2);
        assert_eq!(narrow[0][..], [1.0, 4.0]);
    }

    #[test]
    fn test_interleave_single_channel_fills_outputs() {
        let planar = vec![vec![0.5, -0.5]];
        let mut out = [0.0; 6];
        interleave_into(&planar, 2, &mut out, 3);
        assert_eq!(out, [0.5, 0.5, 0.5, -0.5, -0.5, -0.5]);
    }

    #[test]
    fn test_interleave_silences_unmapped_outputs() {
        let planar = vec![vec![1.0, 3.0], vec![2.0, 4.0]];
        let mut out = [9.0; 6];
        interleave_into(&planar, 2, &mut out, 3);
        assert_eq!(out, [1.0, 2.0, 0.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_interleave_ignores_surplus_planar() {
        let planar = vec![vec![1.0], vec![2.0], vec![3.0]];
        let mut out = [0.0; 2];
        interleave_into(&planar, 1, &mut out, 2);
        assert_eq!(out, [1.0, 2.0]);
    }
}
