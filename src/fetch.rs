//! Fetch policy
//!
//! Shapes a mapped list page into the output of a list operation:
//! inline (`FETCH`), first entity only (`FETCH_ONE`) or written to storage
//! (`STORE`).

use crate::error::{Error, Result};
use crate::http::PageLinks;
use crate::output::StorageDestination;
use crate::types::FetchType;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::info;

/// One mapped page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub entities: Vec<T>,
    pub links: PageLinks,
}

/// Output of a list operation
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOutput<T> {
    /// Inline entities; always empty for `STORE`
    #[serde(default = "Vec::new")]
    pub entities: Vec<T>,
    pub count: usize,
    /// Object URI of the stored batch
    pub uri: Option<String>,
    pub next_page_info: Option<String>,
    pub previous_page_info: Option<String>,
}

/// Output of a delete operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutput {
    pub id: u64,
    pub deleted: bool,
}

/// Fail early when `STORE` has nowhere to write
pub fn ensure_destination(fetch_type: FetchType, storage: Option<&StorageDestination>) -> Result<()> {
    if fetch_type == FetchType::Store && storage.is_none() {
        return Err(Error::config("STORE fetch type requires a storage destination"));
    }
    Ok(())
}

/// Apply the fetch type to a page.
///
/// `resource` names the stored object (`orders/dt=.../orders-....jsonl`).
/// `STORE` of an empty page still writes an empty object.
pub async fn apply_fetch_type<T: Serialize>(
    fetch_type: FetchType,
    resource: &str,
    page: Page<T>,
    storage: Option<&StorageDestination>,
) -> Result<ListOutput<T>> {
    let Page { entities, links } = page;

    let (entities, count, uri) = match fetch_type {
        FetchType::Fetch => {
            let count = entities.len();
            (entities, count, None)
        }
        FetchType::FetchOne => {
            let first: Vec<T> = entities.into_iter().take(1).collect();
            let count = first.len();
            (first, count, None)
        }
        FetchType::Store => {
            let storage = storage
                .ok_or_else(|| Error::config("STORE fetch type requires a storage destination"))?;
            let uri = storage.store_entities(resource, &entities).await?;
            info!(count = entities.len(), %uri, "Stored {resource}");
            (Vec::new(), entities.len(), Some(uri))
        }
    };

    Ok(ListOutput {
        entities,
        count,
        uri,
        next_page_info: links.next,
        previous_page_info: links.previous,
    })
}
