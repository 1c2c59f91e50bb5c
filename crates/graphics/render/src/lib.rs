//! SVG path data to raster pixels: parse, flatten, stroke and rasterize.
//!
//! Hinting, stroke caps/joins/miters, gradients, clipping, path booleans
//! and dash patterns are all out of scope — see DESIGN.md at the workspace
//! root. Image file I/O, blend-mode math beyond a pixel mixer, and generic
//! geometry helpers are collaborators from the `image` and `math` crates,
//! not this one.

mod error;
mod flatten;
mod parser;
mod path;
mod rasterize;
mod stroke;

pub use error::PathError;
pub use flatten::{commands_to_polygons, Contour, ContourSet};
pub use parser::parse;
pub use path::{Path, PathCommand, PathCommandKind};
pub use rasterize::{fill_polygons, WindingRule, DEFAULT_QUALITY};
pub use stroke::stroke_contours;

use image::{ColorRGBA, Image, Mixer};
use math::Vec2;

/// Fill a path's enclosed area into `image`.
pub fn fill_path(
    image: &mut Image,
    path: &Path,
    color: ColorRGBA,
    winding_rule: WindingRule,
    mixer: Mixer,
    quality: u32,
) -> Result<(), PathError> {
    log::debug!(
        "fill_path: {} commands, quality {quality}",
        path.commands.len()
    );
    let contours = commands_to_polygons(&path.commands)?;
    log::debug!("fill_path: flattened into {} contours", contours.len());

    let size = Vec2::new(image.width() as f32, image.height() as f32);
    fill_polygons(image, size, &contours, color, winding_rule, mixer, quality);
    Ok(())
}

/// Stroke a path's outline into `image` with the given total `stroke_width`.
pub fn stroke_path(
    image: &mut Image,
    path: &Path,
    stroke_width: f32,
    color: ColorRGBA,
    winding_rule: WindingRule,
    mixer: Mixer,
    quality: u32,
) -> Result<(), PathError> {
    log::debug!(
        "stroke_path: {} commands, width {stroke_width}",
        path.commands.len()
    );
    let contours = commands_to_polygons(&path.commands)?;
    let half_width = stroke_width / 2.0;
    let outline = stroke_contours(&contours, half_width, half_width);
    log::debug!("stroke_path: {} outline contours", outline.len());

    let size = Vec2::new(image.width() as f32, image.height() as f32);
    fill_polygons(image, size, &outline, color, winding_rule, mixer, quality);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_path_rejects_unsupported_commands_without_touching_the_image() {
        let mut image = Image::new(4, 4);
        let path = Path {
            commands: vec![
                PathCommand::new(PathCommandKind::Move, vec![0.0, 0.0]),
                PathCommand::new(PathCommandKind::SCubic, vec![1.0, 1.0, 2.0, 2.0]),
            ],
            ..Path::default()
        };
        let result = fill_path(
            &mut image,
            &path,
            ColorRGBA::BLACK,
            WindingRule::NonZero,
            image::normal,
            DEFAULT_QUALITY,
        );
        assert_eq!(result, Err(PathError::UnsupportedCommand));
        for pixel in image.pixels() {
            assert_eq!(*pixel, ColorRGBA::TRANSPARENT);
        }
    }

    #[test]
    fn fill_path_end_to_end_rectangle() {
        let mut image = Image::new(20, 20);
        let path = parse("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
        fill_path(
            &mut image,
            &path,
            ColorRGBA::BLACK,
            WindingRule::NonZero,
            image::normal,
            DEFAULT_QUALITY,
        )
        .unwrap();
        assert_eq!(image.get_pixel(5, 5), ColorRGBA::BLACK);
        assert_eq!(image.get_pixel(15, 15), ColorRGBA::TRANSPARENT);
    }

    #[test]
    fn stroke_path_of_a_single_segment_paints_a_band() {
        let mut image = Image::new(20, 20);
        let mut path = Path::new();
        path.move_to(0.0, 5.0);
        path.line_to(20.0, 5.0);
        stroke_path(
            &mut image,
            &path,
            4.0,
            ColorRGBA::BLACK,
            WindingRule::NonZero,
            image::normal,
            DEFAULT_QUALITY,
        )
        .unwrap();
        assert_eq!(image.get_pixel(10, 5), ColorRGBA::BLACK);
    }
}
