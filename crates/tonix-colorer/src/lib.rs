//! Tonix Colorer - tape-style multi-channel nonlinear coloring
//!
//! Each audio channel runs its own [`Channel`]: a differencer with
//! pre-emphasis, two passes through a polynomial waveshaper, a one-pole
//! integrator and a dry blend, scaled by an auto-gain quadratic. The
//! [`Tonix`] block driver adds input/output trims and bypass on top.
//!
//! - [`ColorType`] × [`Brightness`] select one of fifteen coefficient
//!   bundles from the [mode table](lookup)
//! - [`sample_rate_scale`] keeps the filter edges sensible above 44.1 kHz
//! - [`SharedParams`] hands parameters from a control thread to the audio
//!   thread without locks
//!
//! ## Example
//!
//! ```rust
//! use tonix_colorer::{Brightness, ColorType, SharedParams, Tonix};
//! use tonix_core::{Effect, StreamLayout};
//!
//! let shared = SharedParams::new();
//! shared.set_color(ColorType::Radiant);
//! shared.set_brightness(Brightness::Sapphire);
//! shared.set_process_percent(75.0);
//!
//! let mut tonix = Tonix::with_layout(StreamLayout::symmetric(44100.0, 1)).unwrap();
//! tonix.set_params(shared.snapshot());
//!
//! let mut block = [0.5_f32; 128];
//! tonix.process_block(&mut [&mut block[..]]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std as alloc;

pub mod auto_gain;
pub mod channel;
pub mod colorer;
pub mod mode;
pub mod params;
pub mod scaler;
pub mod shared;

pub use auto_gain::auto_gain;
pub use channel::Channel;
pub use colorer::Tonix;
pub use mode::{Brightness, ColorType, Compatibility, ModeCoefficients, lookup, lookup_with};
pub use params::{PARAM_COUNT, ParamSnapshot};
pub use scaler::sample_rate_scale;
pub use shared::SharedParams;
