//! Offline maintenance passes over the anime metadata file.
//!
//! `citations` removes wiki reference markers, `genres` translates Spanish
//! genre labels to English. Both work on records loaded by `dataset`.

pub mod citations;
pub mod config;
pub mod dataset;
pub mod genres;
pub mod logging;
