/// REST API module for the tinychain daemon
///
/// Exposes the node over HTTP:
/// - mining (`/mine`) and transaction submission (`/transactions/new`)
/// - chain inspection (`/chain`), which is also what peers consume during
///   conflict resolution
/// - peer registration (`/nodes/register`) and consensus (`/nodes/resolve`)

pub mod handlers;
pub mod responses;
pub mod server;

pub use responses::*;
pub use server::ApiServer;
