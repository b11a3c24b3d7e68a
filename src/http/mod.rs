//! HTTP layer
//!
//! Request construction, the fixed-delay rate limiter, the transport seam
//! and `Link` header cursors.
//!
//! # Features
//!
//! - **Request Builder**: Admin API URL, access token and JSON headers
//! - **Rate Limiting**: fixed pause before every call
//! - **Transport**: reqwest in production, injectable for tests

mod client;
mod link;
mod rate_limit;
mod request;

pub use client::{HttpTransport, RawResponse, ShopifyClient, Transport};
pub use link::PageLinks;
pub use rate_limit::RateLimiter;
pub use request::{PreparedRequest, RequestBuilder, ACCESS_TOKEN_HEADER};

#[cfg(test)]
mod tests;
