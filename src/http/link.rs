//! `Link` header cursor extraction
//!
//! Shopify paginates REST lists with cursors carried in the `Link` header:
//! `<https://shop/admin/api/2024-10/orders.json?limit=50&page_info=abc>; rel="next"`.

use serde::{Deserialize, Serialize};
use url::Url;

/// Cursors for the neighbouring pages of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageLinks {
    /// Parse cursors from an optional `Link` header value
    pub fn from_header(header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::default();
        };
        Self {
            next: parse_link_header(header, "next").and_then(|u| page_info(&u)),
            previous: parse_link_header(header, "previous").and_then(|u| page_info(&u)),
        }
    }
}

/// Parse a Link header and extract the URL for the given rel
fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="previous"
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}

/// Extract the `page_info` query value from a page URL
fn page_info(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "page_info")
        .map(|(_, v)| v.into_owned())
}
