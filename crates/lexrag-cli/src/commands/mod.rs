//! CLI command implementations

pub mod ask;
pub mod cleanup;
pub mod ingest;
pub mod search;
pub mod status;
