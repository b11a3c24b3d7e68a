//! Output storage
//!
//! Destination for STORE fetches: local disk or object storage
//! (S3, R2, GCS, Azure), written as one JSON-lines object per fetch.

mod storage;

pub use storage::{build_object_name, to_json_lines, StorageDestination};
