//! Inbound adapters that translate external requests into catalogue calls
//! while keeping framework details at the edge.

pub mod http;
