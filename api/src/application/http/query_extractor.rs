use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use searchbar_core::domain::search_bar::value_objects::SearchParams;
use tracing::{debug, warn};

use crate::application::http::server::api_entities::api_error::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Extractor for the parameters a search bar binds to
///
/// The query string is always read. The body is read only when it is
/// form-urlencoded; any other body leaves the body mapping empty.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     SearchParamsExtractor(params): SearchParamsExtractor,
/// ) -> Result<Response, ApiError> {
///     // Hand params to a SearchBarView
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SearchParamsExtractor(pub SearchParams);

impl<S> FromRequest<S> for SearchParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query_string = req.uri().query().unwrap_or("");
        let query = parse_pairs(query_string.as_bytes(), "query string")?;

        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

        let body = if is_form {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            parse_pairs(&bytes, "form body")?
        } else {
            HashMap::new()
        };

        debug!(query = query.len(), body = body.len(), "extracted search params");

        Ok(SearchParamsExtractor(SearchParams::new(query, body)))
    }
}

/// Decodes urlencoded pairs. A repeated key keeps its last value.
fn parse_pairs(input: &[u8], source: &str) -> Result<HashMap<String, String>, ApiError> {
    serde_urlencoded::from_bytes(input).map_err(|e| {
        warn!(source, error = %e, "rejected urlencoded parameters");
        ApiError::BadRequest(format!("invalid {source}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn test_parse_pairs_keeps_last_value() {
        let pairs = parse_pairs(b"name=a&name=b&age=3", "query string").unwrap();
        assert_eq!(pairs.get("name").map(String::as_str), Some("b"));
        assert_eq!(pairs.get("age").map(String::as_str), Some("3"));
        assert!(parse_pairs(b"", "query string").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_body_ignored_without_form_content_type() {
        let req = axum::http::Request::builder()
            .uri("/filters?name=arsham%20x")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("name=other"))
            .unwrap();

        let SearchParamsExtractor(params) =
            SearchParamsExtractor::from_request(req, &()).await.unwrap();
        assert_eq!(params.query.get("name").map(String::as_str), Some("arsham x"));
        assert!(params.body.is_empty());
    }

    #[tokio::test]
    async fn test_form_body_is_decoded() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
            .body(Body::from("name=arsham&order_by=desc"))
            .unwrap();

        let SearchParamsExtractor(params) =
            SearchParamsExtractor::from_request(req, &()).await.unwrap();
        assert!(params.query.is_empty());
        assert_eq!(params.body.get("order_by").map(String::as_str), Some("desc"));
    }
}
