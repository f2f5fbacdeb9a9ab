mod fixed;

use chrono::{DateTime, Utc};

pub use fixed::{FixedDecimal, SCALE};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
