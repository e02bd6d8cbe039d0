//! Domain logic for the plant disease service.
//!
//! Everything in here is pure: validation, confidence handling, and the
//! match predicates used by the retrieval endpoints. Storage and HTTP live
//! in `plantdx-db` and `plantdx-api`.

pub mod confidence;
pub mod disease;
pub mod error;
pub mod query;
pub mod types;
