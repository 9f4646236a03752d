use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::field_spec::{
    entities::FieldRecord, errors::ConfigurationError, value_objects::Choice,
};

use super::ports::ParamSource;

/// Key that `SearchBar::get` answers with the rendered form.
pub const AS_FORM_KEY: &str = "as_form";

pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

impl FormMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMethod::Get => "get",
            FormMethod::Post => "post",
        }
    }
}

impl FromStr for FormMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "get" => Ok(FormMethod::Get),
            "post" => Ok(FormMethod::Post),
            _ => Err(ConfigurationError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for FormMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request parameters: the query string mapping and the body mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: HashMap<String, String>,
    pub body: HashMap<String, String>,
}

impl SearchParams {
    pub fn new(query: HashMap<String, String>, body: HashMap<String, String>) -> Self {
        Self { query, body }
    }

    pub fn from_query<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query: collect_pairs(pairs),
            body: HashMap::new(),
        }
    }

    pub fn from_body<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query: HashMap::new(),
            body: collect_pairs(pairs),
        }
    }
}

fn collect_pairs<K, V, I>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl ParamSource for SearchParams {
    fn query_params(&self) -> &HashMap<String, String> {
        &self.query
    }

    fn body_params(&self) -> &HashMap<String, String> {
        &self.body
    }
}

/// Value accepted by `SearchBar::set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A text field with this display label
    Label(String),
    /// A choice field labelled after the field name
    Choices(Vec<Choice>),
    Record(FieldRecord),
}

impl From<&str> for FieldValue {
    fn from(label: &str) -> Self {
        FieldValue::Label(label.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(label: String) -> Self {
        FieldValue::Label(label)
    }
}

impl From<Vec<Choice>> for FieldValue {
    fn from(choices: Vec<Choice>) -> Self {
        FieldValue::Choices(choices)
    }
}

impl From<FieldRecord> for FieldValue {
    fn from(record: FieldRecord) -> Self {
        FieldValue::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search_bar::ports::ParamSourceExt;

    #[test]
    fn test_form_method_parse() {
        assert_eq!("GET".parse::<FormMethod>(), Ok(FormMethod::Get));
        assert_eq!(" post ".parse::<FormMethod>(), Ok(FormMethod::Post));
        assert!("put".parse::<FormMethod>().is_err());
        assert_eq!(FormMethod::default(), FormMethod::Post);
    }

    #[test]
    fn test_search_data_prefers_query() {
        let params = SearchParams::new(
            HashMap::from([("name".to_string(), "q".to_string())]),
            HashMap::from([("name".to_string(), "b".to_string())]),
        );
        assert_eq!(params.search_data().get("name").map(String::as_str), Some("q"));

        let params = SearchParams::from_body([("name", "b")]);
        assert_eq!(params.search_data().get("name").map(String::as_str), Some("b"));
    }
}
