//! GameBackend adapters - implementations of the machine's capability port.

mod http_client;
mod local;

pub use http_client::{HttpBackendConfig, HttpGameBackend};
pub use local::LocalGameBackend;
