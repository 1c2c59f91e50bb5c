use math::Vec2;

use crate::error::PathError;
use crate::path::{PathCommand, PathCommandKind};

/// An ordered polyline produced by flattening one subpath.
pub type Contour = Vec<Vec2>;

/// One contour per subpath, in source order.
pub type ContourSet = Vec<Contour>;

const ADAPTIVE_ERROR_TOLERANCE: f32 = 0.25;
const MAX_ADAPTIVE_DEPTH: u32 = 24;

/// Append a segment `(a, b)` to `polygon`.
///
/// Skips degenerate zero-length segments entirely, and never re-pushes `a`
/// if it is already the polygon's last point.
fn emit_segment(polygon: &mut Contour, a: Vec2, b: Vec2) {
    if a == b {
        return;
    }
    if polygon.last() != Some(&a) {
        polygon.push(a);
    }
    polygon.push(b);
}

/// De Casteljau evaluation of a quadratic Bezier at `t`.
fn quad_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    p0.lerp(p1, t).lerp(p1.lerp(p2, t), t)
}

/// Flatten a quadratic Bezier with the uniform-subdivision scheme: a single
/// segment if the squared second difference is small, otherwise `n` evenly
/// spaced samples.
fn flatten_quad(polygon: &mut Contour, p0: Vec2, p1: Vec2, p2: Vec2) {
    let d = (p0.x - 2.0 * p1.x + p2.x).powi(2) + (p0.y - 2.0 * p1.y + p2.y).powi(2);

    if d < 1.0 / 3.0 {
        emit_segment(polygon, p0, p2);
        return;
    }

    let n = 1 + ((3.0 * d).sqrt().sqrt().floor() as u32);
    let mut prev = p0;
    for k in 1..n {
        let t = k as f32 / n as f32;
        let point = quad_point(p0, p1, p2, t);
        emit_segment(polygon, prev, point);
        prev = point;
    }
    emit_segment(polygon, prev, p2);
}

/// Adaptive recursive midpoint refinement, shared by cubic and arc
/// flattening: subdivide `[t0, t1]` until the midpoint of the chord
/// approximates `eval` closely enough.
fn flatten_adaptive(polygon: &mut Contour, eval: &dyn Fn(f32) -> Vec2, t0: f32, t1: f32, depth: u32) {
    let p0 = eval(t0);
    let p1 = eval(t1);

    if depth >= MAX_ADAPTIVE_DEPTH {
        emit_segment(polygon, p0, p1);
        return;
    }

    let mid_t = (t0 + t1) / 2.0;
    let mid = eval(mid_t);
    let chord_mid = p0.lerp(p1, 0.5);
    let error = (chord_mid - mid).length();

    if error < ADAPTIVE_ERROR_TOLERANCE {
        emit_segment(polygon, p0, p1);
    } else {
        flatten_adaptive(polygon, eval, t0, mid_t, depth + 1);
        flatten_adaptive(polygon, eval, mid_t, t1, depth + 1);
    }
}

fn flatten_cubic(polygon: &mut Contour, at: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) {
    let eval = move |t: f32| -> Vec2 {
        let mt = 1.0 - t;
        at * (mt * mt * mt) + ctrl1 * (3.0 * mt * mt * t) + ctrl2 * (3.0 * mt * t * t) + to * (t * t * t)
    };
    flatten_adaptive(polygon, &eval, 0.0, 1.0, 0);
}

/// Signed angle from `u` to `v`, in radians.
fn angle_between(u: Vec2, v: Vec2) -> f32 {
    u.cross(v).atan2(u.dot(v))
}

/// Endpoint-to-center conversion per SVG Appendix F.6, returning
/// `(center, rx, ry, theta, delta)`.
fn arc_endpoint_to_center(
    at: Vec2,
    to: Vec2,
    rx: f32,
    ry: f32,
    rotation_deg: f32,
    large_arc: bool,
    sweep: bool,
) -> (Vec2, f32, f32, f32, f32) {
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    let rotation = rotation_deg.to_radians();
    let (sin_r, cos_r) = rotation.sin_cos();

    let d = (at - to) * 0.5;
    let p = Vec2::new(cos_r * d.x + sin_r * d.y, -sin_r * d.x + cos_r * d.y);

    let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let denom = rx2 * p.y * p.y + ry2 * p.x * p.x;
    let numerator = (rx2 * ry2 - rx2 * p.y * p.y - ry2 * p.x * p.x).max(0.0);
    let mut q = if denom.abs() < f32::EPSILON {
        0.0
    } else {
        (numerator / denom).sqrt()
    };
    if large_arc == sweep {
        q = -q;
    }

    let c_prime = Vec2::new(q * rx * p.y / ry, -q * ry * p.x / rx);
    let center = Vec2::new(
        cos_r * c_prime.x - sin_r * c_prime.y,
        sin_r * c_prime.x + cos_r * c_prime.y,
    ) + (at + to) * 0.5;

    let u = Vec2::new((p.x - c_prime.x) / rx, (p.y - c_prime.y) / ry);
    let v = Vec2::new((-p.x - c_prime.x) / rx, (-p.y - c_prime.y) / ry);

    let theta = angle_between(Vec2::new(1.0, 0.0), u);
    let mut delta = angle_between(u, v) % std::f32::consts::TAU;

    if !sweep {
        delta -= std::f32::consts::TAU;
    }

    let tau = std::f32::consts::TAU;
    while delta > tau {
        delta -= tau;
    }
    while delta <= -tau {
        delta += tau;
    }

    (center, rx, ry, theta, delta)
}

fn flatten_arc(polygon: &mut Contour, at: Vec2, to: Vec2, numbers: &[f32]) {
    let [rx, ry, rotation_deg, large_flag, sweep_flag, ..] = numbers else {
        return;
    };
    let large_arc = *large_flag != 0.0;
    let sweep = *sweep_flag != 0.0;

    if at == to {
        return;
    }
    if *rx == 0.0 || *ry == 0.0 {
        emit_segment(polygon, at, to);
        return;
    }

    let (center, rx, ry, theta, delta) = arc_endpoint_to_center(at, to, *rx, *ry, *rotation_deg, large_arc, sweep);
    let rotation = rotation_deg.to_radians();
    let (sin_r, cos_r) = rotation.sin_cos();

    let eval = move |t: f32| -> Vec2 {
        let a = theta + t * delta;
        let (sin_a, cos_a) = a.sin_cos();
        let local = Vec2::new(rx * cos_a, ry * sin_a);
        center + Vec2::new(cos_r * local.x - sin_r * local.y, sin_r * local.x + cos_r * local.y)
    };

    flatten_adaptive(polygon, &eval, 0.0, 1.0, 0);
}

struct State {
    start: Vec2,
    at: Vec2,
    ctr: Vec2,
    ctr2: Vec2,
    prev_kind: Option<PathCommandKind>,
}

fn target(at: Vec2, command: &PathCommand, x_index: usize, y_index: usize) -> Vec2 {
    let x = command.numbers[x_index];
    let y = command.numbers[y_index];
    if command.kind.is_relative() {
        at + Vec2::new(x, y)
    } else {
        Vec2::new(x, y)
    }
}

/// Flatten a command sequence into a [ContourSet].
///
/// Reproduces, deliberately, the source quirks this crate's design notes
/// call out: `Move`/`RMove` never flush the in-progress polygon (only
/// `Close` does), and an absolute `SCubic` ('S') always fails with
/// [PathError::UnsupportedCommand] — only its relative form is implemented.
pub fn commands_to_polygons(commands: &[PathCommand]) -> Result<ContourSet, PathError> {
    let mut state = State {
        start: Vec2::zero(),
        at: Vec2::zero(),
        ctr: Vec2::zero(),
        ctr2: Vec2::zero(),
        prev_kind: None,
    };
    let mut polygon: Contour = Vec::new();
    let mut output: ContourSet = Vec::new();

    for command in commands {
        use PathCommandKind::*;

        match command.kind {
            Move | RMove => {
                state.at = target(state.at, command, 0, 1);
                state.start = state.at;
            }
            Line | RLine => {
                let to = target(state.at, command, 0, 1);
                emit_segment(&mut polygon, state.at, to);
                state.at = to;
            }
            HLine => {
                let to = Vec2::new(command.numbers[0], state.at.y);
                emit_segment(&mut polygon, state.at, to);
                state.at = to;
            }
            RHLine => {
                let to = Vec2::new(state.at.x + command.numbers[0], state.at.y);
                emit_segment(&mut polygon, state.at, to);
                state.at = to;
            }
            VLine => {
                let to = Vec2::new(state.at.x, command.numbers[0]);
                emit_segment(&mut polygon, state.at, to);
                state.at = to;
            }
            RVLine => {
                let to = Vec2::new(state.at.x, state.at.y + command.numbers[0]);
                emit_segment(&mut polygon, state.at, to);
                state.at = to;
            }
            Quad | RQuad => {
                let ctrl = target(state.at, command, 0, 1);
                let to = target(state.at, command, 2, 3);
                flatten_quad(&mut polygon, state.at, ctrl, to);
                state.ctr = ctrl;
                state.at = to;
            }
            TQuad | RTQuad => {
                let ctrl = if state.prev_kind.map(|k| k.is_quad_family()).unwrap_or(false) {
                    state.at * 2.0 - state.ctr
                } else {
                    state.at
                };
                let to = target(state.at, command, 0, 1);
                flatten_quad(&mut polygon, state.at, ctrl, to);
                state.ctr = ctrl;
                state.at = to;
            }
            Cubic | RCubic => {
                let ctrl1 = target(state.at, command, 0, 1);
                let ctrl2 = target(state.at, command, 2, 3);
                let to = target(state.at, command, 4, 5);
                flatten_cubic(&mut polygon, state.at, ctrl1, ctrl2, to);
                state.ctr2 = ctrl2;
                state.at = to;
            }
            SCubic => {
                log::warn!("flattener: absolute SCubic is not handled");
                return Err(PathError::UnsupportedCommand);
            }
            RSCubic => {
                let ctrl1 = if state.prev_kind.map(|k| k.is_cubic_family()).unwrap_or(false) {
                    state.at * 2.0 - state.ctr2
                } else {
                    state.at
                };
                let ctrl2 = target(state.at, command, 0, 1);
                let to = target(state.at, command, 2, 3);
                flatten_cubic(&mut polygon, state.at, ctrl1, ctrl2, to);
                state.ctr2 = ctrl2;
                state.at = to;
            }
            Arc | RArc => {
                let to = target(state.at, command, 5, 6);
                flatten_arc(&mut polygon, state.at, to, &command.numbers);
                state.at = to;
            }
            Close => {
                if state.at != state.start {
                    if state.prev_kind.map(|k| k.is_quad_family()).unwrap_or(false) {
                        flatten_quad(&mut polygon, state.at, state.ctr, state.start);
                    } else {
                        emit_segment(&mut polygon, state.at, state.start);
                    }
                }
                output.push(std::mem::take(&mut polygon));
                state.at = state.start;
            }
        }

        state.prev_kind = Some(command.kind);
    }

    if !polygon.is_empty() {
        output.push(polygon);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    fn flatten_str(data: &str) -> ContourSet {
        let path = crate::parser::parse(data).unwrap();
        commands_to_polygons(&path.commands).unwrap()
    }

    #[test]
    fn axis_aligned_rectangle_closes_into_one_contour() {
        let contours = flatten_str("M0 0 L10 0 L10 10 L0 10 Z");
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0][0], Vec2::new(0.0, 0.0));
    }

    #[test]
    fn move_does_not_flush_the_in_progress_polygon() {
        // Two subpaths with no Close between them stay in the same contour.
        let contours = flatten_str("M0 0 L10 0 M20 20 L30 20");
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn absolute_s_cubic_is_unsupported() {
        let path = Path {
            commands: vec![
                PathCommand::new(PathCommandKind::Move, vec![0.0, 0.0]),
                PathCommand::new(PathCommandKind::SCubic, vec![1.0, 1.0, 2.0, 2.0]),
            ],
            ..Path::default()
        };
        assert_eq!(
            commands_to_polygons(&path.commands),
            Err(PathError::UnsupportedCommand)
        );
    }

    #[test]
    fn relative_s_cubic_is_handled() {
        let contours = flatten_str("M0 0 C 1 1 2 2 3 3 s 1 1 2 2");
        assert_eq!(contours.len(), 1);
        assert!(contours[0].len() > 2);
    }

    #[test]
    fn empty_command_list_yields_no_contours() {
        assert_eq!(commands_to_polygons(&[]).unwrap(), ContourSet::new());
    }

    #[test]
    fn flatten_is_deterministic() {
        let a = flatten_str("M0 0 C 10 0 10 10 0 10 Z");
        let b = flatten_str("M0 0 C 10 0 10 10 0 10 Z");
        assert_eq!(a, b);
    }

    #[test]
    fn small_quad_second_difference_collapses_to_one_segment() {
        let mut polygon = Vec::new();
        flatten_quad(
            &mut polygon,
            Vec2::new(0.0, 0.0),
            Vec2::new(0.1, 0.0),
            Vec2::new(0.2, 0.0),
        );
        assert_eq!(polygon, vec![Vec2::new(0.0, 0.0), Vec2::new(0.2, 0.0)]);
    }
}
