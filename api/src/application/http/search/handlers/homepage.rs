use crate::application::http::query_extractor::SearchParamsExtractor;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use axum::response::Html;
use searchbar_core::domain::common::escape_html;
use searchbar_core::domain::search_bar::ports::SearchBarView;
use searchbar_core::domain::search_bar::value_objects::FormMethod;
use uuid::Uuid;

/// Renders the search bar bound to the request, followed by the resulting
/// filter or the validation errors.
pub async fn homepage(
    State(state): State<AppState>,
    SearchParamsExtractor(params): SearchParamsExtractor,
) -> Result<Html<String>, ApiError> {
    let mut search_bar = state
        .search
        .get_searchbar(&params)?
        .with_action(format!("{}/", state.args.server.root_path));

    if search_bar.method() == FormMethod::Post {
        // Demo token only. Nothing checks it on the way back in.
        search_bar = search_bar.with_csrf_token(Uuid::new_v4().simple().to_string());
    }

    let outcome = if search_bar.is_valid() {
        format!(
            "<p>Filter: <code>{}</code></p>",
            escape_html(&search_bar.filters().to_string())
        )
    } else {
        let items: String = search_bar
            .errors()
            .iter()
            .map(|error| format!("<li>{}</li>", escape_html(error)))
            .collect();
        format!("<ul class=\"errorlist\">{items}</ul>")
    };

    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Search</title></head>\n<body>\n{}\n{}\n</body>\n</html>",
        search_bar.render(),
        outcome
    )))
}
