//! Storage destinations (local, S3, R2, GCS, Azure, memory)

use crate::error::{Error, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Build a Hive-style partitioned object name for a stored batch
///
/// Format: `{resource}/dt={YYYY-MM-DD}/{resource}-{YYYYMMDDTHHMMSSmmm}Z.jsonl`
pub fn build_object_name(resource: &str, at: DateTime<Utc>) -> String {
    let date = at.format("%Y-%m-%d");
    let stamp = at.format("%Y%m%dT%H%M%S%3fZ");
    format!("{resource}/dt={date}/{resource}-{stamp}.jsonl")
}

/// Serialize entities as JSON lines, one entity per line
pub fn to_json_lines<T: Serialize>(entities: &[T]) -> Result<Bytes> {
    let mut buf = Vec::new();
    for entity in entities {
        serde_json::to_writer(&mut buf, entity)?;
        buf.push(b'\n');
    }
    Ok(Bytes::from(buf))
}

/// Storage destination parsed from a URL
#[derive(Debug, Clone)]
pub struct StorageDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// URI root returned objects are addressed from
    location: String,
    /// URL scheme
    scheme: String,
}

impl StorageDestination {
    /// Parse a destination URL and create the matching object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `r2://bucket/path/` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `memory://` - in-process store
    /// - `/local/path/`, `./path/` or `file:///path` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url, false)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true)
        } else if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else if url.starts_with("memory://") {
            Ok(Self::in_memory())
        } else {
            Self::parse_local(url)
        }
    }

    /// In-process store, useful for embedding and tests
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            prefix: String::new(),
            location: "memory:/".to_string(),
            scheme: "memory".to_string(),
        }
    }

    /// Split `scheme://bucket/prefix` into bucket and prefix
    fn split_bucket<'a>(url: &'a str, scheme: &str) -> Result<(&'a str, String)> {
        let without_scheme = url
            .strip_prefix(&format!("{scheme}://"))
            .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;

        let (bucket, prefix) = match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].trim_end_matches('/').to_string(),
            ),
            None => (without_scheme, String::new()),
        };
        if bucket.is_empty() {
            return Err(Error::config(format!("Missing bucket in {scheme} URL: {url}")));
        }
        Ok((bucket, prefix))
    }

    /// Parse S3 or R2 URL
    fn parse_s3(url: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = Self::split_bucket(url, scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            location: format!("{scheme}://{bucket}"),
            scheme: scheme.to_string(),
        })
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, prefix) = Self::split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            location: format!("gs://{bucket}"),
            scheme: "gs".to_string(),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let (container, prefix) = Self::split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            location: format!("az://{container}"),
            scheme: "az".to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);
        if path.trim().is_empty() {
            return Err(Error::config("Storage destination path is empty"));
        }

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;
        let root = std::fs::canonicalize(path)?;

        let store = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            location: format!("file://{}", root.display()),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a remote destination
    pub fn is_cloud(&self) -> bool {
        !matches!(self.scheme.as_str(), "file" | "memory")
    }

    /// Get the scheme (s3, r2, gs, az, file, memory)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    fn object_path(&self, name: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(name)
        } else {
            ObjectPath::from(format!("{}/{name}", self.prefix))
        }
    }

    /// Write bytes to an object and return its URI
    pub async fn write(&self, name: &str, data: Bytes) -> Result<String> {
        let path = self.object_path(name);

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::storage(format!("Failed to write {path}: {e}")))?;

        let uri = format!("{}/{path}", self.location);
        debug!(%uri, "Stored object");
        Ok(uri)
    }

    /// Read an object back by name
    pub async fn read(&self, name: &str) -> Result<Bytes> {
        let path = self.object_path(name);
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| Error::storage(format!("Failed to read {path}: {e}")))?;
        result
            .bytes()
            .await
            .map_err(|e| Error::storage(format!("Failed to read {path}: {e}")))
    }

    /// Write entities as one JSON-lines object, Hive-partitioned by date
    ///
    /// Returns the object URI.
    pub async fn store_entities<T: Serialize>(&self, resource: &str, entities: &[T]) -> Result<String> {
        let name = build_object_name(resource, Utc::now());
        let data = to_json_lines(entities)?;
        self.write(&name, data).await
    }
}
