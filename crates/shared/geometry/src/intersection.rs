//! Segment intersection for indicator crossovers
//!
//! Both segments are expected to span the same two time ordinals, one from
//! each indicator line. `point_a` is the newer end of each segment.

use trendline_core::{FixedDecimal, LineSegment, Point};

use crate::line::SlopeIntercept;

/// Whether the price ranges of two segments overlap or touch
///
/// Cheap necessary-but-not-sufficient test for an intersection.
pub fn do_boundary_boxes_intersect(first: &LineSegment, second: &LineSegment) -> bool {
    let (first_low, first_high) = first.price_range();
    let (second_low, second_high) = second.price_range();
    first_low <= second_high && second_low <= first_high
}

/// Exact segment intersection test (Franklin Antonio, Graphics Gems III)
///
/// Tie-breaks, in order:
/// 1. Newest ends at exactly the same price: `false` (a touch, not a cross).
/// 2. Oldest ends at exactly the same price: `true` (the lines started together).
/// 3. Parallel segments (zero denominator): `false`. Collinear overlap is not
///    detected.
pub fn do_line_segments_intersect(first: &LineSegment, second: &LineSegment) -> bool {
    if first.point_a.price == second.point_a.price {
        return false;
    }
    if first.point_b.price == second.point_b.price {
        return true;
    }

    let (x1, y1) = (first.point_a.x(), first.point_a.y());
    let (x2, y2) = (first.point_b.x(), first.point_b.y());
    let (x3, y3) = (second.point_a.x(), second.point_a.y());
    let (x4, y4) = (second.point_b.x(), second.point_b.y());

    let ax = x2 - x1;
    let ay = y2 - y1;
    let bx = x3 - x4;
    let by = y3 - y4;
    let cx = x1 - x3;
    let cy = y1 - y3;

    let denominator = ay * bx - ax * by;
    if denominator.is_zero() {
        log::trace!("[Geometry] parallel segments, no intersection");
        return false;
    }

    let alpha = by * cx - bx * cy;
    if !within(alpha, denominator) {
        return false;
    }

    let beta = ax * cy - ay * cx;
    within(beta, denominator)
}

/// `numerator / denominator` lies in [0, 1] without dividing
fn within(numerator: FixedDecimal, denominator: FixedDecimal) -> bool {
    if denominator > FixedDecimal::ZERO {
        numerator >= FixedDecimal::ZERO && numerator <= denominator
    } else {
        numerator <= FixedDecimal::ZERO && numerator >= denominator
    }
}

/// Where the lines through two segments meet
///
/// Only the price is meaningful; the returned point carries
/// [`Point::UNPLACED`] as its time ordinal. Equal slopes solve to x = 0.
pub fn calculate_intersection_point(first: &LineSegment, second: &LineSegment) -> Point {
    let first_line = SlopeIntercept::from_segment(first);
    let second_line = SlopeIntercept::from_segment(second);

    let x = first_line.x_intersection(&second_line);
    Point::unplaced(first_line.y_at(x))
}
