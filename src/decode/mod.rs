//! Response decoding
//!
//! Three layers, each usable on its own:
//!
//! - [`decode_response`] validates the status and parses the body into a
//!   generic JSON object
//! - [`take_single`] / [`take_list`] pull the payload out of its envelope
//!   (`{"order": {...}}`, `{"orders": [...]}`)
//! - [`map_entity`] / [`map_entities`] turn payloads into typed models

mod envelope;
mod mapper;
mod response;

pub use envelope::{take_list, take_single};
pub use mapper::{map_entities, map_entity};
pub use response::{decode_response, expect_status};
