use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    field_spec::{entities::FieldSpec, errors::ConfigurationError},
    filter::value_objects::{FilterExpression, Replacements},
};

use super::{entities::SearchBar, value_objects::FormMethod};

/// Source of request parameters, as exposed by the web framework.
#[cfg_attr(test, mockall::automock)]
pub trait ParamSource {
    fn query_params(&self) -> &HashMap<String, String>;

    fn body_params(&self) -> &HashMap<String, String>;
}

/// Helper trait picking the mapping a search bar binds to
pub trait ParamSourceExt: ParamSource {
    /// The query mapping when it carries anything, otherwise the body mapping.
    fn search_data(&self) -> &HashMap<String, String> {
        let query = self.query_params();
        if query.is_empty() {
            self.body_params()
        } else {
            query
        }
    }
}

impl<T: ParamSource + ?Sized> ParamSourceExt for T {}

/// A view that searches with a search bar.
///
/// Implementors declare their fields; the provided methods build the search
/// bar for a request and hand back the filter to apply when the search is
/// valid.
pub trait SearchBarView {
    fn searchbar_fields(&self) -> Vec<FieldSpec>;

    fn searchbar_replacements(&self) -> Replacements {
        Replacements::new()
    }

    fn searchbar_method(&self) -> FormMethod {
        FormMethod::Post
    }

    fn get_searchbar<P>(&self, params: &P) -> Result<SearchBar, ConfigurationError>
    where
        P: ParamSource + ?Sized,
    {
        Ok(SearchBar::new(params, self.searchbar_fields())?
            .with_replacements(self.searchbar_replacements())
            .with_method(self.searchbar_method()))
    }

    /// The filter to narrow a query with, or `None` when the search is not
    /// valid.
    fn search_filters<P>(&self, params: &P) -> Result<Option<FilterExpression>, ConfigurationError>
    where
        P: ParamSource + ?Sized,
    {
        let mut search_bar = self.get_searchbar(params)?;
        if search_bar.is_valid() {
            Ok(Some(search_bar.filters()))
        } else {
            debug!(errors = ?search_bar.errors(), "search bar is not valid, skipping filters");
            Ok(None)
        }
    }
}
