#![doc = include_str!("../README.md")]
//!
//! # Glossary
//!
//! - **Particle:** a moving unit with a kind, position, speed, length, track, and liveness.
//! - **Track:** one branch of the layout, listed as light indices by offset from the start.
//! - **Checkpoint:** a (offset, tracks, switch, outcome) rule that picks a particle's branch.
//! - **Sentinel:** the `None` entry (or any offset past the table) meaning "no light, end of track".
//! - **Fixed-point position:** distance traveled in sixteenths of a light, for sub-light fades.
//! - **Pool:** the fixed set of reusable particle slots.
//! - **Solved:** every destination's score is at its maximum; play stops and the strip celebrates.
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Compile-time checks: exactly one board must be selected for device builds
#[cfg(all(target_os = "none", not(any(feature = "pico1", feature = "pico2"))))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(target_os = "none", feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: device builds run on the ARM cores
#[cfg(all(target_os = "none", not(feature = "arm")))]
compile_error!("Must enable the 'arm' architecture feature for device builds");

// PIO interrupt bindings used by the runner's WS2812 output
#[cfg(target_os = "none")]
#[doc(hidden)]
pub mod pio_irqs;
#[cfg(target_os = "none")]
pub mod runner;
#[cfg(target_os = "none")]
pub mod switch_bank;
#[cfg(feature = "host")]
/// Utilities for converting recorded frames to PNG images (host testing only).
pub mod to_png;

pub mod celebrate;
pub mod config;
pub mod engine;
mod error;
pub mod frame;
pub mod inputs;
pub mod particle;
pub mod presets;
pub mod render;
pub mod resolver;
pub mod scoring;
pub mod topology;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
