//! Trendline Geometry
//!
//! Stateless geometry used to decide whether two indicator lines crossed:
//! - Bounding-box (price range) overlap pre-filter
//! - Exact segment intersection (Franklin Antonio's method)
//! - Intersection point via slope-intercept solving
//!
//! All functions are pure; they are safe to call from any thread.

pub mod intersection;
pub mod line;

pub use intersection::{
    calculate_intersection_point, do_boundary_boxes_intersect, do_line_segments_intersect,
};
pub use line::SlopeIntercept;
