use searchbar_core::domain::{
    filter::value_objects::Lookup, search_bar::value_objects::SearchParams,
};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Options of the filters endpoint. They travel in the query string next to
/// the search fields, which ignore keys they do not declare.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FiltersQuery {
    /// Lookup appended to every filter key, e.g. `icontains`
    #[serde(default)]
    #[validate(custom(function = "validate_lookup"))]
    pub lookup: Option<String>,

    /// Comma separated fields that must have a value
    #[serde(default)]
    #[validate(length(min = 1, message = "require must name at least one field"))]
    pub require: Option<String>,

    /// Comma separated fields to build the filter from
    #[serde(default)]
    #[validate(length(min = 1, message = "only must name at least one field"))]
    pub only: Option<String>,
}

/// Query keys read by [`FiltersQuery`] rather than by the search bar.
pub const FILTER_OPTION_KEYS: [&str; 3] = ["lookup", "require", "only"];

impl FiltersQuery {
    /// Drops the option keys from the query mapping, so that a query holding
    /// only options leaves the search bar bound to the body.
    pub fn strip_options(mut params: SearchParams) -> SearchParams {
        params
            .query
            .retain(|key, _| !FILTER_OPTION_KEYS.contains(&key.as_str()));
        params
    }

    pub fn required_names(&self) -> Vec<&str> {
        split_names(self.require.as_deref())
    }

    pub fn only_names(&self) -> Vec<&str> {
        split_names(self.only.as_deref())
    }
}

fn split_names(value: Option<&str>) -> Vec<&str> {
    value
        .map(|names| {
            names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn validate_lookup(lookup: &str) -> Result<(), ValidationError> {
    let lookup = lookup.trim().to_lowercase();
    if lookup.is_empty() {
        return Ok(());
    }
    lookup
        .parse::<Lookup>()
        .map(|_| ())
        .map_err(|e| ValidationError::new("lookup").with_message(e.to_string().into()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_lookup_validation() {
        let query = FiltersQuery {
            lookup: Some("IContains".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        let query = FiltersQuery {
            lookup: Some("sounds_like".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_strip_options_keeps_search_fields() {
        let params = SearchParams::new(
            HashMap::from([
                ("lookup".to_string(), "icontains".to_string()),
                ("only".to_string(), "name".to_string()),
                ("age".to_string(), "3".to_string()),
            ]),
            HashMap::from([("name".to_string(), "arsham".to_string())]),
        );
        let params = FiltersQuery::strip_options(params);
        assert_eq!(params.query.len(), 1);
        assert!(params.query.contains_key("age"));
        assert_eq!(params.body.len(), 1);
    }

    #[test]
    fn test_names_are_split_and_trimmed() {
        let query = FiltersQuery {
            only: Some("name, age,,".to_string()),
            ..Default::default()
        };
        assert_eq!(query.only_names(), vec!["name", "age"]);
        assert!(query.required_names().is_empty());
    }
}
