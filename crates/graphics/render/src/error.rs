use std::fmt;

/// Everything that can go wrong while building, parsing or flattening a path.
///
/// Rasterizing never fails: by the time a [ContourSet](crate::ContourSet)
/// reaches the rasterizer, the image/blend/geometry collaborators are
/// assumed infallible for in-bounds inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The path parser encountered a number it could not parse, an
    /// arity-0 command with parameters, or a parameter count that is not
    /// a multiple of the command's arity.
    InvalidPath,

    /// A builder operation that exists only as a documented stub
    /// (`quadratic_curve_to`, `arc`, `ellipse`).
    NotImplemented,

    /// The flattener was given a command kind it does not handle.
    ///
    /// Notably, an absolute `SCubic` ('S') command always lands here —
    /// only its relative form `RSCubic` ('s') is implemented.
    UnsupportedCommand,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidPath => "invalid path data",
            Self::NotImplemented => "operation not implemented",
            Self::UnsupportedCommand => "unsupported path command",
        };
        f.write_str(message)
    }
}

impl std::error::Error for PathError {}
