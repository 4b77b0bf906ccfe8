//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue and health endpoint together with
//! the schema wrappers from [`crate::inbound::http::schemas`], so the record
//! crates stay free of utoipa. The document is served by Swagger UI in debug
//! builds and exported with `cargo run --bin openapi-dump`.

use crate::inbound::http::envelope::{
    MessageResponse, SuperheroListResponse, SuperheroResponse, SuperheroSearchResponse,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, PageInfoSchema, SuperheroDraftSchema, SuperheroSchema, ViolationSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Superhero catalogue API",
        description = "Create, browse, search, update and delete superhero records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::superheroes::list_superheroes,
        crate::inbound::http::superheroes::search_superheroes,
        crate::inbound::http::superheroes::get_superhero,
        crate::inbound::http::superheroes::create_superhero,
        crate::inbound::http::superheroes::update_superhero,
        crate::inbound::http::superheroes::delete_superhero,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SuperheroSchema,
        SuperheroDraftSchema,
        PageInfoSchema,
        ViolationSchema,
        ErrorCodeSchema,
        ErrorEnvelope,
        SuperheroListResponse,
        SuperheroSearchResponse,
        SuperheroResponse,
        MessageResponse,
    )),
    tags(
        (name = "superheroes", description = "Superhero catalogue records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
