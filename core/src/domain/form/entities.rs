use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{
    common::humanize,
    field_spec::{
        entities::FieldSpec,
        value_objects::{Choice, Widget},
    },
};

pub const REQUIRED_MESSAGE: &str = "This field is required.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text { widget: Widget },
    Choice { choices: Vec<Choice> },
}

/// A form field derived from a [`FieldSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDefinition {
    pub fn text(name: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text {
                widget: Widget::default(),
            },
            required,
        }
    }

    pub fn choice(
        name: impl Into<String>,
        label: impl Into<String>,
        choices: Vec<Choice>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Choice { choices },
            required,
        }
    }

    pub fn from_spec(spec: &FieldSpec) -> Self {
        match spec {
            FieldSpec::Name(name) => Self::text(name.clone(), humanize(name), false),
            FieldSpec::Record(record) => {
                let label = humanize(&record.label);
                match &record.choices {
                    Some(choices) => {
                        Self::choice(record.label.clone(), label, choices.clone(), record.required)
                    }
                    None => Self {
                        name: record.label.clone(),
                        label,
                        kind: FieldKind::Text {
                            widget: record.widget.unwrap_or_default(),
                        },
                        required: record.required,
                    },
                }
            }
        }
    }

    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.kind {
            FieldKind::Choice { choices } => Some(choices),
            FieldKind::Text { .. } => None,
        }
    }

    /// Validates a raw submitted value, returning the cleaned value. Text
    /// values are trimmed; choice values must match a choice as submitted.
    pub fn clean(&self, raw: Option<&str>) -> Result<String, String> {
        let raw = raw.unwrap_or_default();
        let value = match self.kind {
            FieldKind::Text { .. } => raw.trim(),
            FieldKind::Choice { .. } => raw,
        };

        if value.is_empty() {
            return if self.required {
                Err(REQUIRED_MESSAGE.to_string())
            } else {
                Ok(String::new())
            };
        }

        if let FieldKind::Choice { choices } = &self.kind {
            if !choices.iter().any(|choice| choice.value == value) {
                return Err(format!(
                    "Select a valid choice. {value} is not one of the available choices."
                ));
            }
        }

        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A search form bound to one request's raw input.
///
/// Cleaned values, errors and validity are derived from the field definitions
/// and the raw input whenever they are asked for, so adding or removing a
/// field is reflected immediately.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    fields: Vec<FieldDefinition>,
    raw_input: HashMap<String, String>,
}

impl SearchForm {
    pub fn new(raw_input: HashMap<String, String>, specs: &[FieldSpec]) -> Self {
        let mut form = Self {
            fields: Vec::with_capacity(specs.len()),
            raw_input,
        };
        for spec in specs {
            form.insert(FieldDefinition::from_spec(spec));
        }
        form
    }

    /// Adds a field, replacing any field with the same name in place.
    pub fn insert(&mut self, field: FieldDefinition) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldDefinition> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(index))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn raw_input(&self) -> &HashMap<String, String> {
        &self.raw_input
    }

    pub fn raw_value(&self, name: &str) -> Option<&str> {
        self.raw_input.get(name).map(String::as_str)
    }

    /// Cleaned value of a field; empty when the field is unknown, absent or
    /// invalid.
    pub fn cleaned_value(&self, name: &str) -> String {
        self.field(name)
            .and_then(|field| field.clean(self.raw_value(name)).ok())
            .unwrap_or_default()
    }

    pub fn cleaned_data(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .clean(self.raw_value(&field.name))
                    .ok()
                    .map(|value| (field.name.clone(), value))
            })
            .collect()
    }

    pub fn field_errors(&self, field: &FieldDefinition) -> Vec<String> {
        field
            .clean(self.raw_value(&field.name))
            .err()
            .into_iter()
            .collect()
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .clean(self.raw_value(&field.name))
                    .err()
                    .map(|message| FieldError {
                        field: field.name.clone(),
                        message,
                    })
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|field| field.clean(self.raw_value(&field.name)).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field_spec::entities::FieldRecord;

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fields_not_in_form() {
        let form = SearchForm::new(HashMap::new(), &["name".into(), "age".into()]);
        assert!(form.field("name").is_some());
        assert!(form.field("age").is_some());
        assert!(form.field("blah").is_none());
    }

    #[test]
    fn test_string_spec_becomes_optional_text_field() {
        let definition = FieldDefinition::from_spec(&"order_by".into());
        assert_eq!(definition.name, "order_by");
        assert_eq!(definition.label, "Order By");
        assert!(!definition.required);
        assert_eq!(
            definition.kind,
            FieldKind::Text {
                widget: Widget::Text
            }
        );
    }

    #[test]
    fn test_choices_give_choice_field() {
        let form = SearchForm::new(
            HashMap::new(),
            &[
                "username".into(),
                FieldRecord::new("name").choices([("aaa", "bbb")]).into(),
            ],
        );
        assert!(matches!(
            form.field("username").unwrap().kind,
            FieldKind::Text { .. }
        ));
        assert!(matches!(
            form.field("name").unwrap().kind,
            FieldKind::Choice { .. }
        ));
    }

    #[test]
    fn test_record_widget_is_kept() {
        let definition = FieldDefinition::from_spec(
            &FieldRecord::new("notes").widget(Widget::Textarea).into(),
        );
        assert_eq!(
            definition.kind,
            FieldKind::Text {
                widget: Widget::Textarea
            }
        );
    }

    #[test]
    fn test_cleaned_values_default_to_empty() {
        let form = SearchForm::new(
            input(&[("name", " arsham "), ("age", "")]),
            &["name".into(), "age".into()],
        );
        assert_eq!(form.cleaned_value("name"), "arsham");
        assert_eq!(form.cleaned_value("age"), "");
        assert_eq!(form.cleaned_value("unknown"), "");
        assert!(form.is_valid());
    }

    #[test]
    fn test_choice_outside_set_is_invalid() {
        let form = SearchForm::new(
            input(&[("order_by", "sideways")]),
            &[FieldRecord::new("order_by")
                .choices([("asc", "ASC"), ("desc", "DESC")])
                .into()],
        );
        assert!(!form.is_valid());
        assert_eq!(form.cleaned_value("order_by"), "");
        assert_eq!(
            form.errors(),
            vec![FieldError {
                field: "order_by".to_string(),
                message: "Select a valid choice. sideways is not one of the available choices."
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_choice_values_are_not_trimmed() {
        let specs: Vec<FieldSpec> = vec![
            "name".into(),
            FieldRecord::new("order_by")
                .choices([("asc", "ASC"), ("desc", "DESC")])
                .into(),
        ];
        let form = SearchForm::new(input(&[("name", " x "), ("order_by", " asc ")]), &specs);
        assert_eq!(form.cleaned_value("name"), "x");
        assert_eq!(form.cleaned_value("order_by"), "");
        assert_eq!(
            form.errors()[0].message,
            "Select a valid choice.  asc  is not one of the available choices."
        );

        let form = SearchForm::new(input(&[("order_by", " ")]), &specs);
        assert!(!form.is_valid());
    }

    #[test]
    fn test_required_field_must_be_present() {
        let specs: Vec<FieldSpec> = vec![FieldRecord::new("name").required(true).into()];
        let form = SearchForm::new(input(&[("name2", "arsham")]), &specs);
        assert!(!form.is_valid());
        assert!(form.field("name").unwrap().required);
        assert_eq!(form.errors()[0].message, REQUIRED_MESSAGE);

        let form = SearchForm::new(input(&[("name", "arsham")]), &specs);
        assert!(form.is_valid());
    }

    #[test]
    fn test_insert_replaces_in_place_and_remove() {
        let mut form = SearchForm::new(HashMap::new(), &["a".into(), "b".into()]);
        form.insert(FieldDefinition::text("a", "Alpha", true));
        let names: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(form.field("a").unwrap().label, "Alpha");

        assert!(form.remove("a").is_some());
        assert!(form.remove("a").is_none());
        assert_eq!(form.fields().len(), 1);
    }
}
