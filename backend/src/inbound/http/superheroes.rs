//! Superhero catalogue handlers.
//!
//! ```text
//! GET    /api/superheroes?page=1&limit=5
//! GET    /api/superheroes/search?q=flight
//! GET    /api/superheroes/{id}
//! POST   /api/superheroes
//! PUT    /api/superheroes/{id}
//! DELETE /api/superheroes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest, PaginationError};
use serde::Deserialize;
use superhero_model::{SuperheroDraft, SuperheroId, Violation};
use tracing::debug;
use utoipa::IntoParams;

use super::envelope::{
    MessageResponse, SuperheroListResponse, SuperheroResponse, SuperheroSearchResponse,
};
use super::error::{ErrorEnvelope, json_config, query_config};
use super::schemas::SuperheroDraftSchema;
use super::state::HttpState;
use crate::domain::{Error, NOT_FOUND_MESSAGE};
use crate::inbound::http::ApiResult;

/// Mount point of the catalogue routes.
pub const SCOPE: &str = "/api/superheroes";

/// Confirmation returned by `POST`.
pub const CREATED_MESSAGE: &str = "Superhero created successfully";
/// Confirmation returned by `PUT`.
pub const UPDATED_MESSAGE: &str = "Superhero updated successfully";
/// Confirmation returned by `DELETE`.
pub const DELETED_MESSAGE: &str = "Superhero deleted successfully";

/// Query string of the list endpoint.
///
/// Values stay raw strings so `page=abc` is reported by
/// [`PageRequest::parse`] with the field name instead of a generic
/// decode failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number, default 1.
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size between 1 and 50, default 5.
    #[param(example = "5")]
    pub limit: Option<String>,
}

/// Query string of the search endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text terms; a record matching any term is returned.
    #[param(example = "flight")]
    pub q: Option<String>,
}

fn map_pagination_error(err: &PaginationError) -> Error {
    let message = err.to_string();
    Error::invalid_request(message.clone())
        .with_violations(vec![Violation::new(err.field().as_str(), message)])
}

// A malformed id cannot name a stored record.
fn parse_id(raw: &str) -> Result<SuperheroId, Error> {
    raw.parse().map_err(|_| {
        debug!(id = raw, "superhero id is not a UUID");
        Error::not_found(NOT_FOUND_MESSAGE)
    })
}

/// List one page of superheroes.
#[utoipa::path(
    get,
    path = "/api/superheroes",
    params(ListQuery),
    responses(
        (status = 200, description = "Requested page", body = SuperheroListResponse),
        (status = 400, description = "Invalid pagination", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["superheroes"],
    operation_id = "listSuperheroes"
)]
#[get("")]
pub async fn list_superheroes(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<SuperheroListResponse>> {
    let ListQuery { page, limit } = query.into_inner();
    let request = PageRequest::parse(page.as_deref(), limit.as_deref())
        .map_err(|err| map_pagination_error(&err))?;
    let Page { data, pagination } = state.superheroes.list(request).await?;
    Ok(web::Json(SuperheroListResponse {
        success: true,
        data,
        pagination,
    }))
}

/// Search nickname, real name, origin, catch phrase and powers.
#[utoipa::path(
    get,
    path = "/api/superheroes/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching records", body = SuperheroSearchResponse),
        (status = 400, description = "Missing or blank query", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["superheroes"],
    operation_id = "searchSuperheroes"
)]
#[get("/search")]
pub async fn search_superheroes(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<SuperheroSearchResponse>> {
    let q = query.into_inner().q.unwrap_or_default();
    let data = state.superheroes.search(&q).await?;
    Ok(web::Json(SuperheroSearchResponse {
        success: true,
        data,
    }))
}

/// Fetch one superhero.
#[utoipa::path(
    get,
    path = "/api/superheroes/{id}",
    params(("id" = String, Path, description = "Superhero UUID")),
    responses(
        (status = 200, description = "The record", body = SuperheroResponse),
        (status = 404, description = "Unknown or malformed id", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["superheroes"],
    operation_id = "getSuperhero"
)]
#[get("/{id}")]
pub async fn get_superhero(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuperheroResponse>> {
    let id = parse_id(&path)?;
    let hero = state.superheroes.get(&id).await?;
    Ok(web::Json(SuperheroResponse::found(hero)))
}

/// Create a superhero.
#[utoipa::path(
    post,
    path = "/api/superheroes",
    request_body = SuperheroDraftSchema,
    responses(
        (status = 201, description = "Created", body = SuperheroResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["superheroes"],
    operation_id = "createSuperhero"
)]
#[post("")]
pub async fn create_superhero(
    state: web::Data<HttpState>,
    payload: web::Json<SuperheroDraft>,
) -> ApiResult<HttpResponse> {
    let hero = state.superheroes.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(SuperheroResponse::confirmed(CREATED_MESSAGE, hero)))
}

/// Replace every field of a superhero.
#[utoipa::path(
    put,
    path = "/api/superheroes/{id}",
    params(("id" = String, Path, description = "Superhero UUID")),
    request_body = SuperheroDraftSchema,
    responses(
        (status = 200, description = "Updated", body = SuperheroResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 404, description = "Unknown or malformed id", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["superheroes"],
    operation_id = "updateSuperhero"
)]
#[put("/{id}")]
pub async fn update_superhero(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SuperheroDraft>,
) -> ApiResult<web::Json<SuperheroResponse>> {
    let id = parse_id(&path)?;
    let hero = state.superheroes.update(&id, payload.into_inner()).await?;
    Ok(web::Json(SuperheroResponse::confirmed(UPDATED_MESSAGE, hero)))
}

/// Delete a superhero.
#[utoipa::path(
    delete,
    path = "/api/superheroes/{id}",
    params(("id" = String, Path, description = "Superhero UUID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown or malformed id", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["superheroes"],
    operation_id = "deleteSuperhero"
)]
#[delete("/{id}")]
pub async fn delete_superhero(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_id(&path)?;
    state.superheroes.delete(&id).await?;
    Ok(web::Json(MessageResponse {
        success: true,
        message: DELETED_MESSAGE.to_owned(),
    }))
}

/// Register the catalogue scope.
///
/// `/search` is registered ahead of `/{id}` so it is never read as an id.
///
/// ```
/// use actix_web::App;
/// use backend::inbound::http::superheroes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(SCOPE)
            .app_data(json_config())
            .app_data(query_config())
            .service(list_superheroes)
            .service(create_superhero)
            .service(search_superheroes)
            .service(get_superhero)
            .service(update_superhero)
            .service(delete_superhero),
    );
}
