//! OpenAPI schema definitions for shared model types.
//!
//! `superhero_model` and `pagination` stay free of utoipa. The wrappers here
//! mirror their wire shape and are referenced from the response envelopes
//! through `value_type`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage or another collaborator failed.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`superhero_model::Violation`].
#[derive(ToSchema)]
#[schema(as = Violation)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ViolationSchema {
    /// Wire name of the offending field.
    #[schema(example = "nickname")]
    field: String,
    /// Element position for list fields.
    #[schema(example = 0)]
    index: Option<u32>,
    /// Human-readable explanation.
    #[schema(example = "Nickname must be at least 2 characters")]
    message: String,
}

/// OpenAPI schema for [`superhero_model::Superhero`].
#[derive(ToSchema)]
#[schema(as = Superhero)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SuperheroSchema {
    /// Server-assigned identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Public alias, 2 to 50 characters once trimmed.
    #[schema(example = "Superman")]
    nickname: String,
    /// Civilian name, 2 to 100 characters once trimmed.
    #[schema(example = "Clark Kent")]
    real_name: String,
    /// Origin story, at most 1000 characters.
    origin_description: Option<String>,
    /// At least one power.
    #[schema(example = json!(["Flight", "Super strength"]))]
    superpowers: Vec<String>,
    /// Signature line, at most 200 characters.
    catch_phrase: Option<String>,
    /// Absolute image URLs.
    images: Vec<String>,
}

/// OpenAPI schema for [`superhero_model::SuperheroDraft`].
#[derive(ToSchema)]
#[schema(as = SuperheroDraft)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SuperheroDraftSchema {
    /// Public alias, 2 to 50 characters once trimmed.
    #[schema(example = "Superman")]
    nickname: String,
    /// Civilian name, 2 to 100 characters once trimmed.
    #[schema(example = "Clark Kent")]
    real_name: String,
    /// Origin story, at most 1000 characters.
    origin_description: Option<String>,
    /// At least one power.
    #[schema(example = json!(["Flight"]))]
    superpowers: Vec<String>,
    /// Signature line, at most 200 characters.
    catch_phrase: Option<String>,
    /// Absolute image URLs.
    images: Vec<String>,
}

/// OpenAPI schema for [`pagination::PageInfo`].
#[derive(ToSchema)]
#[schema(as = PageInfo)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PageInfoSchema {
    /// Page that was served.
    #[schema(example = 1)]
    page: u32,
    /// Page size that was applied.
    #[schema(example = 5)]
    limit: u32,
    /// Records across all pages.
    #[schema(example = 12)]
    total: u64,
    /// `ceil(total / limit)`.
    #[schema(example = 3)]
    pages: u64,
}
