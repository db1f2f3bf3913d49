pub mod error;
pub mod geometry;
pub mod intersect;
pub mod math;
pub mod measure;
pub mod parse;

pub use error::{FlatpatError, Result};
