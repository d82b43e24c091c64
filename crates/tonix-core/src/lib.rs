//! Tonix Core - DSP primitives for the tonix tape colorer
//!
//! This crate holds the host-agnostic building blocks the colorer is made
//! from. Nothing in it allocates on the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for planar, in-place block processing
//! - [`StreamLayout`] / [`LayoutError`] - Stream configuration and its rejection
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`ParamDescriptor`] - Range, units, stable ids and choice labels
//!
//! ## Nonlinear Processing
//!
//! - [`Waveshaper`] - Three clamped degree-15 polynomial saturation curves
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`flush_denormal`],
//!   [`flush_subnormal`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! tonix-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod effect;
pub mod layout;
pub mod math;
pub mod param_info;
pub mod waveshaper;

pub use effect::Effect;
pub use layout::{BASE_SAMPLE_RATE, LayoutError, StreamLayout};
pub use math::{db_to_linear, flush_denormal, flush_subnormal, linear_to_db};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use waveshaper::{Waveshaper, shape};
