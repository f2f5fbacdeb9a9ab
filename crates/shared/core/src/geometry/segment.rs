use serde::{Deserialize, Serialize};

use super::Point;
use crate::values::FixedDecimal;

/// Segment between two consecutive points of one indicator line
///
/// `point_a` is the more recent end, `point_b` the older end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub point_a: Point,
    pub point_b: Point,
}

impl LineSegment {
    pub fn new(point_a: Point, point_b: Point) -> Self {
        Self { point_a, point_b }
    }

    /// Price span of the segment as (low, high)
    pub fn price_range(&self) -> (FixedDecimal, FixedDecimal) {
        let (a, b) = (self.point_a.price, self.point_b.price);
        if a <= b { (a, b) } else { (b, a) }
    }
}
