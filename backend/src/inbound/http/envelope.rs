//! Success bodies for the superhero endpoints.
//!
//! Every body carries `success: true`; failures use
//! [`ErrorEnvelope`](super::error::ErrorEnvelope).

use pagination::PageInfo;
use serde::{Deserialize, Serialize};
use superhero_model::Superhero;
use utoipa::ToSchema;

use super::schemas::{PageInfoSchema, SuperheroSchema};

/// `GET /api/superheroes` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuperheroListResponse {
    /// Always `true`.
    pub success: bool,
    /// Records on the requested page.
    #[schema(value_type = Vec<SuperheroSchema>)]
    pub data: Vec<Superhero>,
    /// Page position and totals.
    #[schema(value_type = PageInfoSchema)]
    pub pagination: PageInfo,
}

/// `GET /api/superheroes/search` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuperheroSearchResponse {
    /// Always `true`.
    pub success: bool,
    /// Every matching record.
    #[schema(value_type = Vec<SuperheroSchema>)]
    pub data: Vec<Superhero>,
}

/// Body returning one record, optionally with a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuperheroResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation for create and update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Superhero created successfully")]
    pub message: Option<String>,
    /// The record.
    #[schema(value_type = SuperheroSchema)]
    pub data: Superhero,
}

impl SuperheroResponse {
    /// Body for a plain read.
    #[must_use]
    pub const fn found(data: Superhero) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    /// Body for a mutation with a confirmation message.
    pub fn confirmed(message: impl Into<String>, data: Superhero) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Body carrying only a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    #[schema(example = "Superhero deleted successfully")]
    pub message: String,
}
