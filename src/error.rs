use thiserror::Error;

/// Top-level error type for the flatpat geometry kernel.
#[derive(Debug, Error)]
pub enum FlatpatError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Measure(#[from] MeasureError),
}

/// Errors raised while parsing path data.
///
/// Any parse error is fatal for the whole path: no partial segment list
/// is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected symbol {found:?} at byte {offset}")]
    UnexpectedSymbol { found: char, offset: usize },

    #[error("unknown path command {command:?} at byte {offset}")]
    UnknownCommand { command: char, offset: usize },

    #[error("cannot convert {text:?} to a number at byte {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unexpected end of path data")]
    UnexpectedEnd,
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("distance {distance} is out of range [0, {length}]")]
    DistanceOutOfRange { distance: f64, length: f64 },

    #[error("flattening cannot reach tolerance {tolerance} within {max_subdivisions} subdivisions")]
    ToleranceUnachievable {
        tolerance: f64,
        max_subdivisions: u32,
    },

    #[error("chains are discontinuous: gap of {gap} between shared endpoints")]
    Discontinuity { gap: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by measurement queries.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("no crossing found where exactly one was required")]
    NoCrossing,

    #[error("ambiguous crossing: {count} candidates where exactly one was required")]
    AmbiguousCrossing { count: usize },

    #[error("sweep span is empty or exceeds the boundary length")]
    EmptySpan,

    #[error("sweep step must be positive, got {0}")]
    InvalidStep(f64),
}

/// Convenience type alias for results using [`FlatpatError`].
pub type Result<T> = std::result::Result<T, FlatpatError>;
