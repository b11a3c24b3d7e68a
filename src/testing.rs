//! Test helpers shared by unit tests

use crate::config::ShopifyConfig;
use crate::error::{Error, Result};
use crate::http::{PreparedRequest, RawResponse, ShopifyClient, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays queued responses and records requests
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(RawResponse::new(status, body.to_string()));
    }

    pub fn push_error(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> PreparedRequest {
        self.requests().pop().expect("no request sent")
    }

    /// Path plus query of the last request, relative to the API root
    pub fn last_path(&self) -> String {
        let url = self.last_request().url;
        let path = url
            .path()
            .trim_start_matches("/admin/api/2024-10")
            .to_string();
        match url.query() {
            Some(q) => format!("{path}?{q}"),
            None => path,
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no response queued".to_string())))
    }
}

pub fn test_config() -> ShopifyConfig {
    ShopifyConfig::builder()
        .store_domain("test-store.myshopify.com")
        .access_token("shpat_test")
        .no_rate_limit()
        .build()
}

pub fn fake_client() -> (ShopifyClient, Arc<FakeTransport>) {
    let fake = FakeTransport::new();
    let client = ShopifyClient::with_transport(&test_config(), fake.clone());
    (client, fake)
}
