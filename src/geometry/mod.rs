pub mod flatten;
pub mod polyline;
pub mod segment;

pub use flatten::{FlattenParams, Flattened};
pub use polyline::Polyline;
pub use segment::{CubicSegment, LinearSegment, Segment};
