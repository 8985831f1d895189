/// tinychain daemon library
///
/// This crate provides the HTTP transport around a tinychain node: request
/// parsing and validation, status mapping, and process startup. The ledger,
/// miner, validator, and consensus live in `tinychain-core`.

pub mod api;

pub use api::ApiServer;
