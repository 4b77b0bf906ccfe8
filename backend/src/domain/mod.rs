//! Domain layer: catalogue use cases, ports and the failure type.
//!
//! Record types and validation rules live in `superhero_model` so the client
//! can share them. This module adds what only the server needs.

pub mod error;
pub mod ports;
pub mod superhero_catalogue_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::superhero_catalogue_service::{
    EMPTY_QUERY_MESSAGE, NOT_FOUND_MESSAGE, SuperheroCatalogueService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
