use super::handlers::get_filters::get_filters;
use super::handlers::homepage::homepage;
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};

pub fn search_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/", state.args.server.root_path),
            get(homepage).post(homepage),
        )
        .route(
            &format!("{}/filters", state.args.server.root_path),
            get(get_filters).post(get_filters),
        )
}
