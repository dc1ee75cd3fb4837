//! SCW character prompt compiler.
//!
//! Turns a [`attributes::CharacterAttributes`] record into a deterministic
//! identity, per-pose positive and negative prompts, and the on-disk
//! filenames downstream game tooling parses. Pure and synchronous; the
//! image backend lives in `scw-webui` and the generation loop in
//! `scw-generator`.

pub mod attributes;
pub mod error;
pub mod identity;
pub mod loader;
pub mod naming;
pub mod phrases;
pub mod plan;
pub mod poses;
pub mod prompt;
pub mod settings;
pub mod wardrobe;
