//! Store Locator - coverage overlap detection and chatbot relay
//!
//! This library fetches stores from a locator API, flags stores whose
//! coverage circles overlap, and relays chat queries to the chatbot backend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{OverlapDetector, distance::haversine_distance, intent::{classify, Intent}};
pub use models::{Store, LocatedStore, ChatMessage, CoordinateError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let a = LocatedStore::try_from(Store::new("A", 3.1390, 101.6869)).unwrap();
        let b = LocatedStore::try_from(Store::new("B", 3.1395, 101.6870)).unwrap();
        assert_eq!(OverlapDetector::default().detect(&[a, b]).len(), 2);
    }
}
