//! HTTP handler functions for the facility map API.

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, QueryPayloadError},
    web,
};
use facility_map_search_models::SearchQuery;
use facility_map_server_models::{ApiError, ApiHealth, ApiSearchResponse, SearchQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        facility_count: state.catalog.facilities().len(),
        zip_count: state.catalog.gazetteer().len(),
    })
}

/// `GET /api/facility-types`
///
/// Returns the distinct facility-type categories in the catalog, sorted,
/// for populating the type picker.
pub async fn facility_types(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.facility_types())
}

/// `GET /api/search`
///
/// Runs the search pipeline for a ZIP, radius and optional filters. An
/// unknown ZIP is not an error: it answers with the `noValidZip` overview.
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchQueryParams>,
) -> HttpResponse {
    let query = match SearchQuery::try_from(&*params) {
        Ok(query) => query,
        Err(e) => {
            log::warn!("Rejected search: {e}");
            return HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            });
        }
    };

    let (outcome, presentation) = facility_map_search::search(&state.catalog, &query);

    HttpResponse::Ok().json(ApiSearchResponse::new(&outcome, presentation))
}

/// Turns a query-string deserialization failure into a 400 [`ApiError`].
pub fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected query for {}: {err}", req.path());
    let response = HttpResponse::BadRequest().json(ApiError {
        error: format!("invalid query: {err}"),
    });
    InternalError::from_response(err, response).into()
}
