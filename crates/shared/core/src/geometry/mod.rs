//! Geometric primitives over (relative time, price) used for crossover tests

mod point;
mod segment;

pub use point::Point;
pub use segment::LineSegment;
