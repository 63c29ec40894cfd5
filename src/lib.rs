//! Glyphpath
//!
//! Turns text into vector outlines: TrueType contours decoded into kurbo
//! paths, smart punctuation and ligatures, faux bold and italic, and
//! underline-style decorations.
pub mod core;
pub mod error;
pub mod face;
pub mod font_source;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod outline;
pub mod shaping;
#[cfg(test)]
mod tests;
pub mod typography;
