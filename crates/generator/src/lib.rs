//! Character image generation run.
//!
//! Loads characters, plans every pose variant with `scw-core`, renders
//! each one through an [`runner::ImageBackend`] and writes the
//! post-processed PNGs into a per-run session directory.

pub mod config;
pub mod runner;
pub mod session;
