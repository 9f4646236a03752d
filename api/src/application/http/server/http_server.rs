use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use searchbar_core::domain::{
    field_spec::{entities::FieldSpec, services::normalize},
    filter::value_objects::Replacements,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, info_span, warn};

use crate::application::http::search::router::search_routes;
use crate::application::http::server::app_state::{AppState, ConfiguredSearch};
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let fields = match &args.search.fields_file {
        Some(path) => load_fields(path).await?,
        None => {
            info!("no fields file given, serving the demo fields");
            ConfiguredSearch::demo_fields()
        }
    };

    let replacements: Replacements = args.search.replacements.iter().cloned().collect();

    let search = ConfiguredSearch {
        fields,
        replacements,
        method: args.search.method,
        table: args.search.table.clone(),
    };
    info!(
        fields = search.fields.len(),
        replacements = search.replacements.len(),
        method = %search.method,
        "search bar configured"
    );

    Ok(AppState::new(args, search))
}

async fn load_fields(path: &std::path::Path) -> Result<Vec<FieldSpec>, anyhow::Error> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading fields file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing fields file {}", path.display()))?;
    let fields = normalize(value)?;
    debug!(path = %path.display(), fields = fields.len(), "fields loaded");
    Ok(fields)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring invalid allowed origin");
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    let router = axum::Router::new()
        .merge(search_routes(state.clone()))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}
