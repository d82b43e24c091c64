//! Planar multi-channel sample storage.

/// Audio held as one `Vec<f32>` per channel, all the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarBuffer {
    channels: Vec<Vec<f32>>,
}

impl PlanarBuffer {
    /// Silent buffer of `channels` × `frames`.
    pub fn silent(channels: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channels],
        }
    }

    /// Build from per-channel vectors. Longer channels are truncated to the
    /// shortest one.
    pub fn from_channels(mut channels: Vec<Vec<f32>>) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        for channel in &mut channels {
            channel.truncate(frames);
        }
        Self { channels }
    }

    /// Single-channel buffer.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// Split interleaved frames into planar channels. A trailing partial
    /// frame is dropped.
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Self {
        if channels == 0 {
            return Self::default();
        }
        let frames = samples.len() / channels;
        let mut planar = vec![Vec::with_capacity(frames); channels];
        for frame in samples.chunks_exact(channels) {
            for (channel, &sample) in planar.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self { channels: planar }
    }

    /// Interleave into a single frame-ordered vector.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.channel_count() * self.frames());
        for i in 0..self.frames() {
            for channel in &self.channels {
                out.push(channel[i]);
            }
        }
        out
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Samples of channel `index`.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Every channel as a slice.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Mutable slices over every channel, ready for
    /// [`Effect::process_block`](tonix_core::Effect::process_block).
    pub fn as_mut_slices(&mut self) -> Vec<&mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice).collect()
    }

    /// Largest absolute sample across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0_f32, |peak, s| peak.max(s.abs()))
    }

    /// Root-mean-square level across all channels.
    pub fn rms(&self) -> f32 {
        let count = self.channel_count() * self.frames();
        if count == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .channels
            .iter()
            .flatten()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        (sum / count as f64).sqrt() as f32
    }
}
