// Core algorithm exports
pub mod distance;
pub mod format;
pub mod intent;
pub mod overlap;

pub use distance::{distance_between, haversine_distance, EARTH_RADIUS_M};
pub use format::{format_reply, store_card};
pub use intent::{classify, Intent};
pub use overlap::{OverlapDetector, DEFAULT_COVERAGE_RADIUS_M};
