//! Raster image primitives consumed by the rasterizer.
//!
//! This crate is deliberately thin: it owns pixel storage and the blend
//! mixer, and nothing else. Image file I/O (encoding/decoding PNG, BMP,
//! JPEG, ...) is out of scope — see DESIGN.md at the workspace root for
//! why those codecs were dropped from this crate.

mod blend;
mod color;
mod image;

pub use blend::{normal, BlendMode, Mixer};
pub use color::ColorRGBA;
pub use image::Image;
