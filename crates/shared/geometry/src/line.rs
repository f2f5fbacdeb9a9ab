//! Slope-intercept form of a line through two points

use trendline_core::{FixedDecimal, LineSegment, Point};

/// A line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeIntercept {
    pub slope: FixedDecimal,
    pub intercept: FixedDecimal,
}

impl SlopeIntercept {
    /// Line through the two ends of a segment
    ///
    /// A zero time delta yields slope 0. This is a fallback for degenerate
    /// input, not a vertical line.
    pub fn from_segment(segment: &LineSegment) -> Self {
        let slope = slope(&segment.point_a, &segment.point_b);
        // b = y - m * x, anchored on the newer end
        let intercept = segment.point_a.y() - slope * segment.point_a.x();
        Self { slope, intercept }
    }

    /// y at a given x
    pub fn y_at(&self, x: FixedDecimal) -> FixedDecimal {
        self.slope * x + self.intercept
    }

    /// x where this line meets another
    ///
    /// Returns 0 for equal slopes (parallel or identical lines).
    pub fn x_intersection(&self, other: &SlopeIntercept) -> FixedDecimal {
        let slope_delta = self.slope - other.slope;
        (other.intercept - self.intercept)
            .checked_div(slope_delta)
            .unwrap_or(FixedDecimal::ZERO)
    }
}

/// m = (y - y1) / (x - x1); 0 when the time delta is zero
pub fn slope(point: &Point, other: &Point) -> FixedDecimal {
    let rise = point.y() - other.y();
    let run = point.x() - other.x();
    rise.checked_div(run).unwrap_or_else(|| {
        log::trace!("[Geometry] zero time delta between {} and {}", point, other);
        FixedDecimal::ZERO
    })
}
