//! Stable Diffusion WebUI client library.
//!
//! Provides the `/sdapi/v1` REST wrapper used to render character images
//! and the post-processing step that brings each render to its in-game
//! size.

pub mod api;
pub mod processor;
