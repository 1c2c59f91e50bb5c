use image::{ColorRGBA, Image, Mixer};
use math::{Rect, Vec2};

use crate::flatten::ContourSet;

/// Which pixels count as "inside" a contour set with self-overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindingRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Supersample count used when a caller doesn't pick one explicitly.
pub const DEFAULT_QUALITY: u32 = 4;

/// A scan-line hit: the clamped x position and whether the crossing
/// segment points upward in canvas coordinates (`at.y > to.y`).
#[derive(Clone, Copy, Debug, PartialEq)]
struct Hit {
    x: f32,
    upward: bool,
}

fn contour_bounds(contour: &[Vec2]) -> Rect {
    let mut min = contour[0];
    let mut max = contour[0];
    for &point in &contour[1..] {
        min = min.min(point);
        max = max.max(point);
    }
    Rect::bounding(min, max)
}

/// Scan-line hits for one supersample row of one contour, appended to `hits`.
///
/// A segment is treated as half-open: its `at` endpoint can produce a hit,
/// its `to` endpoint cannot. This is what keeps shared vertices between
/// adjacent segments from being counted twice.
fn collect_hits(contour: &[Vec2], y_line: f32, max_x: f32, hits: &mut Vec<Hit>) {
    for window in contour.windows(2) {
        let (at, to) = (window[0], window[1]);
        if at.y == to.y {
            continue;
        }
        let t = (y_line - at.y) / (to.y - at.y);
        if t < 0.0 || t >= 1.0 {
            continue;
        }
        let x = (at.x + t * (to.x - at.x)).clamp(0.0, max_x);
        hits.push(Hit {
            x,
            upward: at.y > to.y,
        });
    }
}

/// Fill a contour set into `image` with analytic supersampled scanline
/// coverage.
///
/// `size` is the logical canvas extent hits are clamped to; it is normally
/// `(image.width() as f32, image.height() as f32)` but callers may pass a
/// smaller logical size when the image is larger than the area being drawn
/// into.
pub fn fill_polygons(
    image: &mut Image,
    size: Vec2,
    contours: &ContourSet,
    color: ColorRGBA,
    winding_rule: WindingRule,
    mixer: Mixer,
    quality: u32,
) {
    let quality = quality.max(1);
    let bounds: Vec<Rect> = contours
        .iter()
        .map(|c| if c.len() >= 2 { contour_bounds(c) } else { Rect::default() })
        .collect();
    let mut alphas = vec![0f32; image.width()];
    let mut hits: Vec<Hit> = Vec::new();

    for y in 0..image.height() {
        alphas.iter_mut().for_each(|a| *a = 0.0);

        for m in 0..quality {
            let y_line = y as f32 + 0.0001 * std::f32::consts::PI + m as f32 / quality as f32;

            hits.clear();
            for (contour, rect) in contours.iter().zip(bounds.iter()) {
                if contour.len() < 2 || !rect.intersects_row(y) {
                    continue;
                }
                collect_hits(contour, y_line, size.x, &mut hits);
            }
            hits.sort_by(|a, b| a.x.total_cmp(&b.x));

            let mut hit_index = 0;
            let mut pen_fill: i32 = 0;

            for x in 0..image.width() {
                let mut pen_edge = match winding_rule {
                    WindingRule::NonZero => pen_fill as f32,
                    WindingRule::EvenOdd => {
                        if pen_fill.rem_euclid(2) != 0 {
                            1.0
                        } else {
                            0.0
                        }
                    }
                };

                while hit_index < hits.len() && hits[hit_index].x.floor() as usize == x {
                    let hit = hits[hit_index];
                    let cover = hit.x - x as f32;
                    if hit.upward {
                        pen_edge -= 1.0 - cover;
                        pen_fill -= 1;
                    } else {
                        pen_edge += 1.0 - cover;
                        pen_fill += 1;
                    }
                    hit_index += 1;
                }

                alphas[x] += pen_edge;
            }
        }

        for x in 0..image.width() {
            let a = (alphas[x].abs() / quality as f32).clamp(0.0, 1.0);
            if a > 0.0 {
                let color_a = color.with_alpha((a * 255.0).round().clamp(0.0, 255.0) as u8);
                let destination = image.get_pixel(x, y);
                image.set_pixel(x, y, mixer(destination, color_a));
            }
        }
    }
}
