//! Offline block processing engine.

use crate::{PlanarBuffer, Result};
use tonix_core::{Effect, StreamLayout};

/// Drives one [`Effect`] over planar audio in fixed-size blocks.
///
/// The effect must be prepared through [`prepare`](Self::prepare) before
/// processing; an unprepared effect leaves audio untouched.
pub struct ProcessingEngine<E: Effect> {
    effect: E,
    layout: Option<StreamLayout>,
}

impl<E: Effect> ProcessingEngine<E> {
    /// Wrap an effect.
    pub fn new(effect: E) -> Self {
        Self {
            effect,
            layout: None,
        }
    }

    /// Configure the effect for `channels` channels at `sample_rate` Hz.
    pub fn prepare(&mut self, sample_rate: f64, channels: usize) -> Result<()> {
        let layout = StreamLayout::symmetric(sample_rate, channels);
        self.effect.prepare(layout)?;
        self.layout = Some(layout);
        tracing::debug!(sample_rate, channels, "engine prepared");
        Ok(())
    }

    /// Layout of the last successful prepare.
    pub fn layout(&self) -> Option<StreamLayout> {
        self.layout
    }

    /// The wrapped effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// The wrapped effect, mutably (for parameter changes between blocks).
    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Unwrap the effect.
    pub fn into_effect(self) -> E {
        self.effect
    }

    /// Total latency in samples.
    pub fn latency_samples(&self) -> usize {
        self.effect.latency_samples()
    }

    /// Clear the effect's internal state.
    pub fn reset(&mut self) {
        self.effect.reset();
    }

    /// Process one planar block in place.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        self.effect.process_block(channels);
    }

    /// Process a whole buffer, `block_size` frames at a time.
    ///
    /// `progress` is called after every block with the frames done so far
    /// and the total. Returns the processed copy.
    pub fn process_file<F>(
        &mut self,
        input: &PlanarBuffer,
        block_size: usize,
        mut progress: F,
    ) -> PlanarBuffer
    where
        F: FnMut(usize, usize),
    {
        let mut output = input.clone();
        let total = output.frames();
        let block_size = block_size.max(1);

        let mut slices = output.as_mut_slices();
        let mut start = 0;
        while start < total {
            let end = (start + block_size).min(total);
            let mut block: Vec<&mut [f32]> =
                slices.iter_mut().map(|ch| &mut ch[start..end]).collect();
            self.effect.process_block(&mut block);
            start = end;
            progress(start, total);
        }
        drop(slices);

        output
    }
}
