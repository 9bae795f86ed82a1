use std::collections::BTreeSet;

use crate::core::OverlapDetector;
use crate::models::{LocatedStore, RejectedStore, Store};
use crate::services::LocatorApiClient;

/// The store list for the lifetime of the process.
///
/// Built once from the fetched stores. Stores with unusable coordinates are
/// kept aside as rejected and take no part in overlap detection.
#[derive(Debug, Clone)]
pub struct StoreDirectory {
    located: Vec<LocatedStore>,
    rejected: Vec<RejectedStore>,
    overlapping: BTreeSet<String>,
    detector: OverlapDetector,
}

impl StoreDirectory {
    /// Parse coordinates and derive the overlap set
    pub fn build(stores: Vec<Store>, detector: OverlapDetector) -> Self {
        let mut located = Vec::with_capacity(stores.len());
        let mut rejected = Vec::new();

        for store in stores {
            match store.position() {
                Ok(position) => located.push(LocatedStore { store, position }),
                Err(e) => {
                    tracing::warn!("Skipping store {:?}: {}", store.name, e);
                    rejected.push(RejectedStore {
                        name: store.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let overlapping = detector.detect(&located);

        Self {
            located,
            rejected,
            overlapping,
            detector,
        }
    }

    /// A directory with no stores
    pub fn empty(detector: OverlapDetector) -> Self {
        Self::build(Vec::new(), detector)
    }

    /// Fetch the store list and build the directory.
    ///
    /// A failed fetch is logged and yields an empty directory.
    pub async fn load(client: &LocatorApiClient, detector: OverlapDetector) -> Self {
        match client.fetch_stores().await {
            Ok(stores) => {
                let directory = Self::build(stores, detector);
                tracing::info!(
                    "Loaded {} stores ({} rejected, {} overlapping)",
                    directory.located.len(),
                    directory.rejected.len(),
                    directory.overlapping.len()
                );
                directory
            }
            Err(e) => {
                tracing::error!("Error fetching stores from {}: {}", client.base_url(), e);
                Self::empty(detector)
            }
        }
    }

    pub fn stores(&self) -> &[LocatedStore] {
        &self.located
    }

    pub fn rejected(&self) -> &[RejectedStore] {
        &self.rejected
    }

    pub fn overlapping(&self) -> &BTreeSet<String> {
        &self.overlapping
    }

    pub fn detector(&self) -> OverlapDetector {
        self.detector
    }

    pub fn is_overlapping(&self, name: &str) -> bool {
        self.overlapping.contains(name)
    }

    pub fn find(&self, name: &str) -> Option<&LocatedStore> {
        self.located.iter().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.located.len()
    }

    pub fn is_empty(&self) -> bool {
        self.located.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_splits_rejected_stores() {
        let stores = vec![
            Store::new("A", "3.1390", "101.6869"),
            Store::new("B", "3.1395", "101.6870"),
            Store::new("Broken", "n/a", "101.6870"),
        ];

        let directory = StoreDirectory::build(stores, OverlapDetector::default());

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.rejected().len(), 1);
        assert_eq!(directory.rejected()[0].name, "Broken");
        assert!(directory.is_overlapping("A"));
        assert!(directory.is_overlapping("B"));
        assert!(!directory.is_overlapping("Broken"));
    }

    #[test]
    fn test_find_by_name() {
        let directory = StoreDirectory::build(
            vec![Store::new("KLCC", 3.1579, 101.7116)],
            OverlapDetector::default(),
        );

        assert!(directory.find("KLCC").is_some());
        assert!(directory.find("Bangsar").is_none());
    }

    #[tokio::test]
    async fn test_load_failure_yields_empty_directory() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stores")
            .with_status(503)
            .create_async()
            .await;

        let client =
            LocatorApiClient::new(server.url(), std::time::Duration::from_secs(5)).unwrap();
        let directory = StoreDirectory::load(&client, OverlapDetector::default()).await;

        assert!(directory.is_empty());
        assert!(directory.overlapping().is_empty());
    }
}
