use std::collections::BTreeSet;

use crate::core::distance::distance_between;
use crate::models::LocatedStore;

/// Default coverage radius around each store, in meters
pub const DEFAULT_COVERAGE_RADIUS_M: f64 = 5_000.0;

/// Finds stores whose coverage circles intersect.
///
/// Two circles of equal radius intersect when the distance between their
/// centers is at most twice the radius. The boundary is inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapDetector {
    radius_m: f64,
}

impl OverlapDetector {
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m }
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Maximum center-to-center distance for two stores to overlap
    pub fn threshold_m(&self) -> f64 {
        self.radius_m * 2.0
    }

    /// Check a single pair of stores
    #[inline]
    pub fn overlaps(&self, a: &LocatedStore, b: &LocatedStore) -> bool {
        distance_between(a.position, b.position) <= self.threshold_m()
    }

    /// Names of all stores that overlap at least one other store.
    ///
    /// Every unordered pair (i, j) with i < j is checked once, so a store
    /// is never compared with itself.
    pub fn detect(&self, stores: &[LocatedStore]) -> BTreeSet<String> {
        let mut overlapping = BTreeSet::new();

        for (i, a) in stores.iter().enumerate() {
            for b in &stores[i + 1..] {
                if self.overlaps(a, b) {
                    overlapping.insert(a.name().to_string());
                    overlapping.insert(b.name().to_string());
                }
            }
        }

        tracing::debug!(
            "{} of {} stores overlap (threshold {} m)",
            overlapping.len(),
            stores.len(),
            self.threshold_m()
        );

        overlapping
    }
}

impl Default for OverlapDetector {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE_RADIUS_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::EARTH_RADIUS_M;
    use crate::models::Store;

    fn located(name: &str, lat: f64, lng: f64) -> LocatedStore {
        LocatedStore::try_from(Store::new(name, lat, lng)).unwrap()
    }

    #[test]
    fn test_nearby_stores_overlap() {
        let detector = OverlapDetector::default();
        let stores = vec![
            located("A", 3.1390, 101.6869),
            located("B", 3.1395, 101.6870),
        ];

        let result = detector.detect(&stores);
        assert!(result.contains("A"));
        assert!(result.contains("B"));
    }

    #[test]
    fn test_identical_coordinates_overlap() {
        let detector = OverlapDetector::default();
        let stores = vec![located("A", 3.0, 101.0), located("B", 3.0, 101.0)];

        assert_eq!(detector.detect(&stores).len(), 2);
    }

    #[test]
    fn test_single_store_never_overlaps_itself() {
        let detector = OverlapDetector::default();
        let stores = vec![located("Alone", 3.0, 101.0)];

        assert!(detector.detect(&stores).is_empty());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Threshold equal to the exact distance along a meridian
        let a = located("A", 0.0, 0.0);
        let b = located("B", 0.1, 0.0);
        let exact = distance_between(a.position, b.position);
        let detector = OverlapDetector::new(exact / 2.0);

        assert_eq!(detector.detect(&[a.clone(), b.clone()]).len(), 2);

        let tighter = OverlapDetector::new(exact / 2.0 - 0.001);
        assert!(tighter.detect(&[a, b]).is_empty());
    }

    #[test]
    fn test_far_pair_adds_nothing_but_third_store_can() {
        let detector = OverlapDetector::default();
        // A and C are ~22 km apart, B sits between them
        let stores = vec![
            located("A", 3.00, 101.0),
            located("B", 3.05, 101.0),
            located("C", 3.20, 101.0),
        ];

        let result = detector.detect(&stores);
        assert!(result.contains("A"));
        assert!(result.contains("B"));
        assert!(!result.contains("C"));
    }

    #[test]
    fn test_just_over_threshold() {
        // 10 km plus a meter, expressed as degrees of latitude
        let degrees = (10_001.0 / EARTH_RADIUS_M).to_degrees();
        let detector = OverlapDetector::default();
        let stores = vec![located("A", 0.0, 0.0), located("B", degrees, 0.0)];

        assert!(detector.detect(&stores).is_empty());
    }
}
