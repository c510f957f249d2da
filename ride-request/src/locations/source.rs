//! Where location partitions come from.

use std::path::{Path, PathBuf};

use super::client::LocationClient;
use super::error::LocationError;
use super::record::{LocationDto, LocationRecord};

/// The region partitions of the default dataset, in concatenation order.
pub const DEFAULT_REGIONS: [&str; 5] = ["north", "south", "east", "west", "central"];

/// One independently loaded slice of the location dataset.
#[derive(Debug, Clone)]
pub enum PartitionSource {
    /// A JSON file on disk.
    File { name: String, path: PathBuf },
    /// A JSON document served over HTTP.
    Http { name: String, client: LocationClient },
    /// Records already in memory.
    Inline {
        name: String,
        records: Vec<LocationDto>,
    },
}

impl PartitionSource {
    /// A partition backed by a file; the name is the file stem.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// One file partition per region, `{dir}/{region}.json`.
    pub fn region_files(dir: impl AsRef<Path>, regions: &[&str]) -> Vec<Self> {
        let dir = dir.as_ref();
        regions
            .iter()
            .map(|region| Self::File {
                name: (*region).to_string(),
                path: dir.join(format!("{region}.json")),
            })
            .collect()
    }

    /// One HTTP partition per region, sharing a client.
    pub fn http_regions(client: &LocationClient, regions: &[&str]) -> Vec<Self> {
        regions
            .iter()
            .map(|region| Self::Http {
                name: (*region).to_string(),
                client: client.clone(),
            })
            .collect()
    }

    /// A partition from records already in memory.
    pub fn inline(name: impl Into<String>, records: Vec<LocationDto>) -> Self {
        Self::Inline {
            name: name.into(),
            records,
        }
    }

    /// The partition's name, used in errors and logs.
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Http { name, .. } | Self::Inline { name, .. } => name,
        }
    }

    /// Fetch and parse every record of the partition, preserving order.
    pub async fn fetch(&self) -> Result<Vec<LocationRecord>, LocationError> {
        let dtos = match self {
            Self::File { name, path } => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LocationError::Io {
                        partition: name.clone(),
                        source,
                    })?;
                serde_json::from_str(&json).map_err(|e| LocationError::Json {
                    partition: name.clone(),
                    message: e.to_string(),
                })?
            }
            Self::Http { name, client } => client.fetch_partition(name).await?,
            Self::Inline { records, .. } => records.clone(),
        };

        dtos.into_iter()
            .map(|dto| {
                let record_name = dto.display_name.clone();
                LocationRecord::try_from(dto).map_err(|source| LocationError::InvalidRecord {
                    partition: self.name().to_string(),
                    name: record_name,
                    source,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::{LocationClientConfig, LocationIndex};
    use axum::Router;
    use axum::routing::get;
    use tempfile::tempdir;

    const NORTH_JSON: &str = r#"[
        {"SEARCHVAL":"WOODLANDS MRT STATION","ADDRESS":"30 WOODLANDS AVENUE 2","LATITUDE":"1.4370","LONGITUDE":"103.7865"},
        {"SEARCHVAL":"YISHUN MRT STATION","ADDRESS":"51 YISHUN CENTRAL 1","LATITUDE":"1.4295","LONGITUDE":"103.8350"}
    ]"#;

    /// Serve `/data/north.json` on a local port; other partitions 404.
    async fn serve_north() -> LocationClient {
        let app = Router::new().route("/data/north.json", get(|| async { NORTH_JSON }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        LocationClient::new(LocationClientConfig::new(format!("http://{addr}/data"))).unwrap()
    }

    #[test]
    fn region_files_keep_order() {
        let sources = PartitionSource::region_files("data", &DEFAULT_REGIONS);
        let names: Vec<_> = sources.iter().map(PartitionSource::name).collect();
        assert_eq!(names, vec!["north", "south", "east", "west", "central"]);
    }

    #[test]
    fn file_name_is_stem() {
        let source = PartitionSource::file("/tmp/regions/east.json");
        assert_eq!(source.name(), "east");
    }

    #[tokio::test]
    async fn fetch_file_partition() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("north.json");
        std::fs::write(
            &path,
            r#"[{"SEARCHVAL":"Woodlands MRT","ADDRESS":"30 Woodlands Ave 2","LATITUDE":"1.4370","LONGITUDE":"103.7865"}]"#,
        )
        .unwrap();

        let records = PartitionSource::file(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name, "Woodlands MRT");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = PartitionSource::file("/nonexistent/north.json").fetch().await;
        assert!(matches!(result, Err(LocationError::Io { .. })));
    }

    #[tokio::test]
    async fn malformed_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("south.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = PartitionSource::file(&path).fetch().await;
        assert!(matches!(result, Err(LocationError::Json { partition, .. }) if partition == "south"));
    }

    #[tokio::test]
    async fn bad_coordinate_is_invalid_record() {
        let source = PartitionSource::inline(
            "west",
            vec![LocationDto::new("Jurong East", "", "1.33", "far west")],
        );
        let result = source.fetch().await;
        assert!(
            matches!(result, Err(LocationError::InvalidRecord { name, .. }) if name == "Jurong East")
        );
    }

    #[tokio::test]
    async fn fetch_http_partition() {
        let client = serve_north().await;
        let sources = PartitionSource::http_regions(&client, &["north"]);
        assert_eq!(sources[0].name(), "north");

        let records = sources[0].fetch().await.unwrap();
        let names: Vec<_> = records.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["WOODLANDS MRT STATION", "YISHUN MRT STATION"]);
    }

    #[tokio::test]
    async fn missing_http_partition_is_api_error() {
        let client = serve_north().await;
        let sources = PartitionSource::http_regions(&client, &["south"]);

        let result = sources[0].fetch().await;
        assert!(matches!(result, Err(LocationError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn http_regions_load_into_index() {
        let client = serve_north().await;
        let sources = PartitionSource::http_regions(&client, &["north", "south"]);

        let mut index = LocationIndex::default();
        let state = index.load(&sources).await.clone();
        assert!(matches!(state, crate::locations::LoadState::Degraded { .. }));

        let mut index = LocationIndex::default();
        index.load(&sources[..1]).await;
        assert_eq!(index.search("yishun")[0].display_name, "YISHUN MRT STATION");
    }
}
