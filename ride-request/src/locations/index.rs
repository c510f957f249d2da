//! Merged, searchable location index.

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::error::LocationError;
use super::record::LocationRecord;
use super::source::PartitionSource;

/// Default number of matches returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Load progress of a [`LocationIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Partitions have not finished loading; searches return nothing.
    Loading,
    /// All partitions loaded and merged.
    Ready,
    /// At least one partition failed. The index stays empty.
    Degraded { reason: String },
}

/// Location lookup over every loaded partition.
///
/// Records keep their source order: partitions are concatenated in the
/// order they were given, and each partition keeps its own file order.
#[derive(Debug, Clone)]
pub struct LocationIndex {
    records: Vec<LocationRecord>,
    /// Lowercased (display name, address) for each record.
    keys: Vec<(String, String)>,
    state: LoadState,
    max_results: usize,
}

impl LocationIndex {
    /// Create an index that is still waiting for its data.
    pub fn new(max_results: usize) -> Self {
        Self {
            records: Vec::new(),
            keys: Vec::new(),
            state: LoadState::Loading,
            max_results,
        }
    }

    /// Create a ready index over the given records.
    pub fn from_records(records: Vec<LocationRecord>, max_results: usize) -> Self {
        let mut index = Self::new(max_results);
        index.install(Ok(records));
        index
    }

    /// Fetch every partition concurrently and merge them in order.
    ///
    /// Fails as soon as any partition fails.
    pub async fn fetch_all(
        sources: &[PartitionSource],
    ) -> Result<Vec<LocationRecord>, LocationError> {
        let partitions = try_join_all(sources.iter().map(|source| async move {
            let records = source.fetch().await?;
            debug!(partition = source.name(), records = records.len(), "partition loaded");
            Ok::<_, LocationError>(records)
        }))
        .await?;

        Ok(partitions.into_iter().flatten().collect())
    }

    /// Install the outcome of a load.
    ///
    /// Loading is one-shot: once the index has left [`LoadState::Loading`]
    /// further results are ignored.
    pub fn install(&mut self, result: Result<Vec<LocationRecord>, LocationError>) -> &LoadState {
        if self.state != LoadState::Loading {
            warn!(state = ?self.state, "location index already loaded, ignoring result");
            return &self.state;
        }

        match result {
            Ok(records) => {
                self.keys = records
                    .iter()
                    .map(|r| (r.display_name.to_lowercase(), r.address.to_lowercase()))
                    .collect();
                self.records = records;
                self.state = LoadState::Ready;
                info!(records = self.records.len(), "location index ready");
            }
            Err(e) => {
                warn!(error = %e, "failed to load locations");
                self.state = LoadState::Degraded {
                    reason: e.to_string(),
                };
            }
        }

        &self.state
    }

    /// Fetch all partitions and install the result.
    pub async fn load(&mut self, sources: &[PartitionSource]) -> &LoadState {
        let result = Self::fetch_all(sources).await;
        self.install(result)
    }

    /// Whether the data has loaded successfully.
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Number of records in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of matches a search returns.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Case-insensitive substring search over display name and address.
    ///
    /// Returns at most `max_results` matches in source order. Blank queries
    /// and queries made before the index is ready return nothing.
    pub fn search(&self, query: &str) -> Vec<&LocationRecord> {
        if !self.is_ready() || query.trim().is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.keys
            .iter()
            .zip(&self.records)
            .filter(|((name, address), _)| name.contains(&needle) || address.contains(&needle))
            .map(|(_, record)| record)
            .take(self.max_results)
            .collect()
    }
}

impl Default for LocationIndex {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use crate::locations::LocationDto;

    fn record(name: &str, address: &str) -> LocationRecord {
        LocationRecord {
            display_name: name.to_string(),
            address: address.to_string(),
            point: Point::DEFAULT,
        }
    }

    fn sample_index() -> LocationIndex {
        LocationIndex::from_records(
            vec![
                record("Orchard MRT", "437 Orchard Road"),
                record("Somerset MRT", "149 Orchard Road"),
                record("Dhoby Ghaut MRT", "11 Orchard Road"),
                record("ION Orchard", "2 Orchard Turn"),
                record("Paragon", "290 Orchard Road"),
                record("Tangs", "310 Orchard Road"),
                record("Changi Airport", "Airport Boulevard"),
            ],
            DEFAULT_MAX_RESULTS,
        )
    }

    #[test]
    fn orchard_query_finds_orchard_mrt() {
        let index = sample_index();
        let matches = index.search("orchard");
        assert_eq!(matches[0].display_name, "Orchard MRT");
    }

    #[test]
    fn results_capped_in_source_order() {
        let index = sample_index();
        let names: Vec<_> = index
            .search("ORCHARD")
            .into_iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Orchard MRT",
                "Somerset MRT",
                "Dhoby Ghaut MRT",
                "ION Orchard",
                "Paragon"
            ]
        );
    }

    #[test]
    fn matches_address_only() {
        let index = sample_index();
        let matches = index.search("boulevard");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].display_name, "Changi Airport");
    }

    #[test]
    fn blank_query_returns_nothing() {
        let index = sample_index();
        assert!(index.search("").is_empty());
        assert!(index.search("   \t").is_empty());
    }

    #[test]
    fn search_before_load_returns_nothing() {
        let index = LocationIndex::default();
        assert!(!index.is_ready());
        assert!(index.search("orchard").is_empty());
    }

    #[test]
    fn failed_load_degrades() {
        let mut index = LocationIndex::default();
        let state = index.install(Err(LocationError::Api {
            status: 500,
            message: "boom".into(),
        }));
        assert!(matches!(state, LoadState::Degraded { .. }));
        assert!(!index.is_ready());
        assert!(index.is_empty());
        assert!(index.search("orchard").is_empty());
    }

    #[test]
    fn second_install_is_ignored() {
        let mut index = sample_index();
        let before = index.len();
        index.install(Ok(vec![record("Other", "")]));
        assert_eq!(index.len(), before);
        assert!(index.is_ready());
    }

    #[tokio::test]
    async fn load_merges_partitions_in_order() {
        let sources = vec![
            PartitionSource::inline(
                "north",
                vec![
                    LocationDto::new("Woodlands", "", "1.43", "103.78"),
                    LocationDto::new("Yishun", "", "1.42", "103.83"),
                ],
            ),
            PartitionSource::inline(
                "south",
                vec![LocationDto::new("Harbourfront", "", "1.26", "103.82")],
            ),
        ];

        let mut index = LocationIndex::default();
        assert_eq!(index.load(&sources).await, &LoadState::Ready);

        let names: Vec<_> = index
            .search("o")
            .into_iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Woodlands", "Harbourfront"]);
        assert_eq!(index.len(), 3);
    }

    #[tokio::test]
    async fn bundled_regions_load() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let sources = PartitionSource::region_files(dir, &crate::locations::DEFAULT_REGIONS);

        let mut index = LocationIndex::default();
        assert_eq!(index.load(&sources).await, &LoadState::Ready);
        assert_eq!(index.search("orchard")[0].display_name, "ORCHARD MRT STATION");
        assert_eq!(index.search("changi")[0].display_name, "CHANGI AIRPORT");
    }

    #[tokio::test]
    async fn one_failed_partition_empties_index() {
        let sources = vec![
            PartitionSource::inline(
                "north",
                vec![LocationDto::new("Woodlands", "", "1.43", "103.78")],
            ),
            PartitionSource::file("/nonexistent/south.json"),
        ];

        let mut index = LocationIndex::default();
        let state = index.load(&sources).await.clone();
        assert!(matches!(state, LoadState::Degraded { reason } if reason.contains("south")));
        assert!(index.is_empty());
    }
}
