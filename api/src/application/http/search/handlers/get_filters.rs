use crate::application::http::query_extractor::SearchParamsExtractor;
use crate::application::http::search::validators::FiltersQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Query, State};
use searchbar_core::domain::filter::value_objects::Predicate;
use searchbar_core::domain::search_bar::ports::SearchBarView;
use searchbar_core::infrastructure::filter::preview_sql;
use serde::Serialize;
use tracing::debug;
use validator::Validate;

#[derive(Debug, Serialize, PartialEq)]
pub struct GetFiltersResponse {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Textual form of the AND expression, absent when the search is not valid
    pub filter: Option<String>,
    pub predicates: Vec<Predicate>,
    pub sql: Option<String>,
}

pub async fn get_filters(
    State(state): State<AppState>,
    Query(query): Query<FiltersQuery>,
    SearchParamsExtractor(params): SearchParamsExtractor,
) -> Result<Response<GetFiltersResponse>, ApiError> {
    query.validate()?;

    let params = FiltersQuery::strip_options(params);
    let mut search_bar = state.search.get_searchbar(&params)?;
    let valid = search_bar.is_valid_for(&query.required_names());

    if !valid {
        debug!(errors = ?search_bar.errors(), "search is not valid");
        return Ok(Response::OK(GetFiltersResponse {
            valid,
            errors: search_bar.errors().to_vec(),
            filter: None,
            predicates: Vec::new(),
            sql: None,
        }));
    }

    let expression =
        search_bar.get_filters(&query.only_names(), query.lookup.as_deref().unwrap_or_default());

    Ok(Response::OK(GetFiltersResponse {
        valid,
        errors: Vec::new(),
        filter: Some(expression.to_string()),
        sql: Some(preview_sql(&state.search.table, &expression)),
        predicates: expression.predicates,
    }))
}
