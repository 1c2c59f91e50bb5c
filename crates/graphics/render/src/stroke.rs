use math::Segment;

use crate::flatten::{Contour, ContourSet};

/// Expand a contour set into offset outline polygons.
///
/// `width_right` and `width_left` are each typically `stroke_width / 2`;
/// exposing them separately lets a caller stroke asymmetrically.
///
/// No caps or miters are emitted: a contour's right and left sides are
/// simply joined at the first/last sample, leaving a butt-like end on open
/// paths, and a non-intersecting corner is left as a notch rather than
/// filled in. Both are carried over from the algorithm this stroker
/// implements, not bugs introduced here.
#[must_use]
pub fn stroke_contours(contours: &ContourSet, width_right: f32, width_left: f32) -> ContourSet {
    contours
        .iter()
        .filter_map(|contour| stroke_contour(contour, width_right, width_left))
        .collect()
}

fn stroke_contour(contour: &Contour, width_right: f32, width_left: f32) -> Option<Contour> {
    if contour.len() < 2 {
        return None;
    }

    let mut right_side = Vec::new();
    let mut left_side = Vec::new();
    let mut prev_right: Option<Segment> = None;
    let mut prev_left: Option<Segment> = None;

    for window in contour.windows(2) {
        let (at, to) = (window[0], window[1]);
        if at == to {
            continue;
        }

        let tangent = (at - to).normalize();
        let normal = tangent.perpendicular();

        let right = Segment::new(at + normal * width_right, to + normal * width_right);
        let left = Segment::new(at - normal * width_left, to - normal * width_left);

        merge_or_push(&mut right_side, prev_right, &right);
        right_side.push(right.to);
        prev_right = Some(right);

        merge_or_push(&mut left_side, prev_left, &left);
        left_side.push(left.to);
        prev_left = Some(left);
    }

    if right_side.is_empty() {
        return None;
    }

    let mut outline = right_side;
    outline.extend(left_side.into_iter().rev());
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    Some(outline)
}

/// Merge the current side's offset segment with the previous one: if they
/// cross, replace the previously emitted endpoint with the crossing point
/// (closing the corner); otherwise accept the gap and start a fresh point.
fn merge_or_push(side: &mut Vec<math::Vec2>, prev: Option<Segment>, current: &Segment) {
    match prev.and_then(|p| p.intersects(current)) {
        Some(corner) => match side.last_mut() {
            Some(last) => *last = corner,
            None => side.push(corner),
        },
        None => side.push(current.at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::Vec2;

    #[test]
    fn stroking_a_straight_segment_yields_a_four_point_rectangle() {
        let contours = vec![vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]];
        let outline = stroke_contours(&contours, 1.0, 1.0);
        assert_eq!(outline.len(), 1);
        // right side (2 pts) + left side reversed (2 pts) + closing repeat.
        assert_eq!(outline[0].len(), 5);
    }

    #[test]
    fn degenerate_single_point_contour_is_skipped() {
        let contours = vec![vec![Vec2::new(0.0, 0.0)]];
        assert!(stroke_contours(&contours, 1.0, 1.0).is_empty());
    }

    #[test]
    fn a_right_angle_corner_merges_via_segment_intersection() {
        let contours = vec![vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ]];
        let outline = stroke_contours(&contours, 1.0, 1.0);
        assert_eq!(outline.len(), 1);
        assert!(outline[0].len() >= 5);
    }
}
