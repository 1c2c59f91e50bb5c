use math::Vec2;

use crate::error::PathError;

/// The 19 SVG path-data command kinds this crate understands.
///
/// Absolute and relative forms are distinct variants rather than a shared
/// variant plus a `relative: bool` flag, matching how the parser and
/// flattener both switch on kind directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathCommandKind {
    Close,
    Move,
    RMove,
    Line,
    RLine,
    HLine,
    RHLine,
    VLine,
    RVLine,
    Cubic,
    RCubic,
    SCubic,
    RSCubic,
    Quad,
    RQuad,
    TQuad,
    RTQuad,
    Arc,
    RArc,
}

impl PathCommandKind {
    /// The number of `f32` parameters this kind carries.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Close => 0,
            Self::HLine | Self::RHLine | Self::VLine | Self::RVLine => 1,
            Self::Move | Self::RMove | Self::Line | Self::RLine | Self::TQuad | Self::RTQuad => 2,
            Self::SCubic | Self::RSCubic | Self::Quad | Self::RQuad => 4,
            Self::Cubic | Self::RCubic => 6,
            Self::Arc | Self::RArc => 7,
        }
    }

    /// Whether this kind's parameters are relative to the current pen position.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        matches!(
            self,
            Self::RMove
                | Self::RLine
                | Self::RHLine
                | Self::RVLine
                | Self::RCubic
                | Self::RSCubic
                | Self::RQuad
                | Self::RTQuad
                | Self::RArc
        )
    }

    /// The SVG command letter for this kind (uppercase absolute, lowercase relative).
    #[must_use]
    pub const fn letter(&self) -> char {
        match self {
            Self::Close => 'Z',
            Self::Move => 'M',
            Self::RMove => 'm',
            Self::Line => 'L',
            Self::RLine => 'l',
            Self::HLine => 'H',
            Self::RHLine => 'h',
            Self::VLine => 'V',
            Self::RVLine => 'v',
            Self::Cubic => 'C',
            Self::RCubic => 'c',
            Self::SCubic => 'S',
            Self::RSCubic => 's',
            Self::Quad => 'Q',
            Self::RQuad => 'q',
            Self::TQuad => 'T',
            Self::RTQuad => 't',
            Self::Arc => 'A',
            Self::RArc => 'a',
        }
    }

    /// The kind a given command letter maps to, or `None` if unrecognized.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'Z' | 'z' => Self::Close,
            'M' => Self::Move,
            'm' => Self::RMove,
            'L' => Self::Line,
            'l' => Self::RLine,
            'H' => Self::HLine,
            'h' => Self::RHLine,
            'V' => Self::VLine,
            'v' => Self::RVLine,
            'C' => Self::Cubic,
            'c' => Self::RCubic,
            'S' => Self::SCubic,
            's' => Self::RSCubic,
            'Q' => Self::Quad,
            'q' => Self::RQuad,
            'T' => Self::TQuad,
            't' => Self::RTQuad,
            'A' => Self::Arc,
            'a' => Self::RArc,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn is_quad_family(&self) -> bool {
        matches!(self, Self::Quad | Self::RQuad | Self::TQuad | Self::RTQuad)
    }

    #[must_use]
    pub const fn is_cubic_family(&self) -> bool {
        matches!(self, Self::Cubic | Self::RCubic | Self::SCubic | Self::RSCubic)
    }
}

/// One path-data command: a kind plus its parameters.
///
/// Invariant: `numbers.len() == kind.arity()`.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    pub kind: PathCommandKind,
    pub numbers: Vec<f32>,
}

impl PathCommand {
    #[must_use]
    pub fn new(kind: PathCommandKind, numbers: Vec<f32>) -> Self {
        debug_assert_eq!(numbers.len(), kind.arity());
        Self { kind, numbers }
    }

    /// Render this command as SVG path-data syntax: the command letter
    /// followed by its space-separated parameters.
    ///
    /// Integers are emitted without a decimal point; other floats use
    /// their default `Display` formatting.
    #[must_use]
    pub fn write_svg(&self) -> String {
        let mut out = String::new();
        out.push(self.kind.letter());
        for (i, n) in self.numbers.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if n.fract() == 0.0 && n.is_finite() {
                out.push_str(&(*n as i64).to_string());
            } else {
                out.push_str(&n.to_string());
            }
        }
        out
    }
}

/// A sequence of path commands plus the pen position the builder methods
/// maintain while assembling it.
///
/// `at` is a builder-side convenience: the flattener recomputes position
/// purely from `commands` and never reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub at: Vec2,
    pub commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: PathCommandKind, numbers: Vec<f32>) {
        self.commands.push(PathCommand::new(kind, numbers));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathCommandKind::Move, vec![x, y]);
        self.at = Vec2::new(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.push(PathCommandKind::Line, vec![x, y]);
        self.at = Vec2::new(x, y);
    }

    pub fn close_path(&mut self) {
        self.push(PathCommandKind::Close, vec![]);
    }

    pub fn bezier_curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.push(PathCommandKind::Cubic, vec![x1, y1, x2, y2, x3, y3]);
        self.at = Vec2::new(x3, y3);
    }

    /// Trace a rectangle clockwise: `Move, Line, Line, Line, Line, Close`.
    ///
    /// The fourth `Line` returns to the start before `Close`, which is then
    /// a redundant no-op — matching the way this builder was originally
    /// written rather than the minimal three-`Line` form.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.line_to(x, y);
        self.close_path();
    }

    /// Canvas-style circular arc tangent to `(pen -> p1)` and `(p1 -> p2)` with radius `r`.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, r: f32) {
        const EPSILON: f32 = 1e-6;

        let p0 = self.at;
        let p1 = Vec2::new(x1, y1);
        let p2 = Vec2::new(x2, y2);

        if (p0 - p1).length() < EPSILON {
            self.move_to(p1.x, p1.y);
            return;
        }

        let v01 = p0 - p1;
        let v21 = p2 - p1;
        let cross = v01.cross(v21);

        if r == 0.0 || cross.abs() < EPSILON {
            self.line_to(p1.x, p1.y);
            return;
        }

        let len01 = v01.length();
        let len21 = v21.length();
        let cos_theta = math::clamp(v01.dot(v21) / (len01 * len21), -1.0, 1.0);
        let half_theta = math::arccos(cos_theta) / 2.0;
        let dist_to_tangent = r / half_theta.tan();

        let t1 = p1 + v01.normalize() * dist_to_tangent;
        let t2 = p1 + v21.normalize() * dist_to_tangent;

        if (p0 - t1).length() > EPSILON {
            self.line_to(t1.x, t1.y);
        }

        let sweep = if v01.y * v21.x > v01.x * v21.y { 1.0 } else { 0.0 };
        self.push(
            PathCommandKind::Arc,
            vec![r, r, 0.0, 0.0, sweep, t2.x, t2.y],
        );
        self.at = t2;
    }

    /// Concatenate `other`'s commands onto this path; the pen continues
    /// from `other`'s final position.
    pub fn add_path(&mut self, other: &Path) {
        self.commands.extend(other.commands.iter().cloned());
        self.at = other.at;
    }

    /// Documented but unimplemented: always fails.
    pub fn quadratic_curve_to(&mut self, _cpx: f32, _cpy: f32, _x: f32, _y: f32) -> Result<(), PathError> {
        Err(PathError::NotImplemented)
    }

    /// Documented but unimplemented: always fails.
    pub fn arc(
        &mut self,
        _x: f32,
        _y: f32,
        _radius: f32,
        _start_angle: f32,
        _end_angle: f32,
        _anticlockwise: bool,
    ) -> Result<(), PathError> {
        Err(PathError::NotImplemented)
    }

    /// Documented but unimplemented: always fails.
    pub fn ellipse(
        &mut self,
        _x: f32,
        _y: f32,
        _radius_x: f32,
        _radius_y: f32,
        _rotation: f32,
        _start_angle: f32,
        _end_angle: f32,
        _anticlockwise: bool,
    ) -> Result<(), PathError> {
        Err(PathError::NotImplemented)
    }

    /// An n-sided polygon.
    ///
    /// Known bug: ignores `x`, `y` and `size` entirely and always draws at
    /// `(100, 100)` with a circumradius of `80`. Only `sides` has any
    /// effect. Reproduced as-is rather than fixed.
    pub fn polygon(&mut self, _x: f32, _y: f32, _size: f32, sides: u32) {
        let sides = sides.max(3);
        let center = Vec2::new(100.0, 100.0);
        let radius = 80.0;

        for i in 0..sides {
            let angle = (i as f32) / (sides as f32) * std::f32::consts::TAU;
            let point = center + Vec2::new(radius * angle.cos(), radius * angle.sin());
            if i == 0 {
                self.move_to(point.x, point.y);
            } else {
                self.line_to(point.x, point.y);
            }
        }
        self.close_path();
    }

    /// Render this path as an SVG path-data string, one command after another
    /// with no separator beyond each command's own leading letter.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&command.write_svg());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_matches_data_model() {
        assert_eq!(PathCommandKind::Close.arity(), 0);
        assert_eq!(PathCommandKind::HLine.arity(), 1);
        assert_eq!(PathCommandKind::Move.arity(), 2);
        assert_eq!(PathCommandKind::Quad.arity(), 4);
        assert_eq!(PathCommandKind::Cubic.arity(), 6);
        assert_eq!(PathCommandKind::Arc.arity(), 7);
    }

    #[test]
    fn letter_round_trips_through_from_letter() {
        for kind in [
            PathCommandKind::Move,
            PathCommandKind::RLine,
            PathCommandKind::HLine,
            PathCommandKind::Cubic,
            PathCommandKind::RSCubic,
            PathCommandKind::TQuad,
            PathCommandKind::RArc,
            PathCommandKind::Close,
        ] {
            assert_eq!(PathCommandKind::from_letter(kind.letter()), Some(kind));
        }
    }

    #[test]
    fn rect_emits_five_commands_clockwise() {
        let mut path = Path::new();
        path.rect(10.0, 10.0, 20.0, 20.0);
        assert_eq!(path.commands.len(), 6);
        assert_eq!(path.commands[0].kind, PathCommandKind::Move);
        assert_eq!(path.commands[5].kind, PathCommandKind::Close);
        assert_eq!(path.at, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn unimplemented_stubs_fail_without_mutating_commands() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        let before = path.commands.len();
        assert_eq!(path.arc(0.0, 0.0, 1.0, 0.0, 1.0, false), Err(PathError::NotImplemented));
        assert_eq!(path.commands.len(), before);
    }

    #[test]
    fn polygon_ignores_its_arguments() {
        let mut path = Path::new();
        path.polygon(0.0, 0.0, 5.0, 4);
        assert_eq!(path.commands[0].kind, PathCommandKind::Move);
        assert_eq!(path.commands[0].numbers, vec![180.0, 100.0]);
    }

    #[test]
    fn write_svg_formats_integers_without_a_decimal_point() {
        let command = PathCommand::new(PathCommandKind::Move, vec![100.0, -0.15]);
        assert_eq!(command.write_svg(), "M100 -0.15");
    }
}
