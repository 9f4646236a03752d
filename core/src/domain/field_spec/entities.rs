use serde::Deserialize;
use validator::Validate;

use super::{
    errors::ConfigurationError,
    value_objects::{Choice, Widget},
};

/// A declared search field: either a bare name or a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum FieldSpec {
    Name(String),
    Record(FieldRecord),
}

impl FieldSpec {
    /// The request key of the field. For records this is the record's label.
    pub fn name(&self) -> &str {
        match self {
            FieldSpec::Name(name) => name,
            FieldSpec::Record(record) => &record.label,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            FieldSpec::Name(_) => false,
            FieldSpec::Record(record) => record.required,
        }
    }

    /// Values that never make it into a filter.
    pub fn ignore_list(&self) -> &[String] {
        match self {
            FieldSpec::Name(_) => &[],
            FieldSpec::Record(record) => &record.ignore_list,
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        FieldSpec::Name(name.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        FieldSpec::Name(name)
    }
}

impl From<FieldRecord> for FieldSpec {
    fn from(record: FieldRecord) -> Self {
        FieldSpec::Record(record)
    }
}

/// Structured field declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct FieldRecord {
    #[validate(length(min = 1, message = "label is required"))]
    pub label: String,
    pub required: bool,
    pub choices: Option<Vec<Choice>>,
    pub widget: Option<Widget>,
    pub ignore_list: Vec<String>,
}

impl FieldRecord {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn widget(mut self, widget: Widget) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn ignore<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_list = values.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the invariants a record must hold before it can back a field.
    pub fn check(&self) -> Result<(), ConfigurationError> {
        self.validate()
            .map_err(|e| ConfigurationError::InvalidLabel(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec_name() {
        assert_eq!(FieldSpec::from("username").name(), "username");
        let record = FieldRecord::new("gender").ignore(["none"]);
        let spec = FieldSpec::from(record);
        assert_eq!(spec.name(), "gender");
        assert_eq!(spec.ignore_list(), &["none".to_string()]);
        assert!(!spec.is_required());
    }

    #[test]
    fn test_record_builder() {
        let record = FieldRecord::new("order_by")
            .required(true)
            .choices([("asc", "ASC"), ("desc", "DESC")]);
        assert!(record.required);
        assert_eq!(
            record.choices,
            Some(vec![Choice::new("asc", "ASC"), Choice::new("desc", "DESC")])
        );
        assert!(record.check().is_ok());
    }

    #[test]
    fn test_record_with_empty_label_fails_check() {
        let err = FieldRecord::new("").check().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidLabel(_)));
    }
}
