//! Outbound HTTP plumbing.

mod http;

pub use http::{HttpTransport, TransportError};
