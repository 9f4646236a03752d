//! Normalization of heterogeneous field declarations.
//!
//! A search bar can be declared with a single name, a single record, or a list
//! mixing both, either through typed values or as JSON. Everything funnels into
//! an ordered `Vec<FieldSpec>` whose records have been checked.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{
    entities::{FieldRecord, FieldSpec},
    errors::ConfigurationError,
    value_objects::Choice,
};

/// Normalizes a JSON field declaration into an ordered list of field specs.
///
/// A string or an object yields a one-element list; an array yields one spec
/// per element, in order.
pub fn normalize(value: Value) -> Result<Vec<FieldSpec>, ConfigurationError> {
    let specs = match value {
        Value::Array(items) => items
            .into_iter()
            .map(FieldSpec::try_from)
            .collect::<Result<Vec<FieldSpec>, ConfigurationError>>()?,
        other => vec![FieldSpec::try_from(other)?],
    };

    debug!(count = specs.len(), "normalized field specs");
    Ok(specs)
}

/// Conversion of the accepted field declaration shapes into field specs.
pub trait IntoFieldSpecs {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError>;
}

impl IntoFieldSpecs for Value {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        normalize(self)
    }
}

impl IntoFieldSpecs for FieldSpec {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        checked(vec![self])
    }
}

impl IntoFieldSpecs for FieldRecord {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        checked(vec![FieldSpec::Record(self)])
    }
}

impl IntoFieldSpecs for &str {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        Ok(vec![FieldSpec::from(self)])
    }
}

impl IntoFieldSpecs for String {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        Ok(vec![FieldSpec::from(self)])
    }
}

impl<T: Into<FieldSpec>> IntoFieldSpecs for Vec<T> {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        checked(self.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldSpec>, const N: usize> IntoFieldSpecs for [T; N] {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        checked(self.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldSpec> + Clone> IntoFieldSpecs for &[T] {
    fn into_field_specs(self) -> Result<Vec<FieldSpec>, ConfigurationError> {
        checked(self.iter().cloned().map(Into::into).collect())
    }
}

fn checked(specs: Vec<FieldSpec>) -> Result<Vec<FieldSpec>, ConfigurationError> {
    for spec in &specs {
        if let FieldSpec::Record(record) = spec {
            record.check()?;
        }
    }
    Ok(specs)
}

impl TryFrom<Value> for FieldSpec {
    type Error = ConfigurationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(FieldSpec::Name(name)),
            Value::Object(map) => parse_record(map).map(FieldSpec::Record),
            other => {
                warn!("rejected field spec of type {}", json_type(&other));
                Err(ConfigurationError::InvalidFieldType(
                    json_type(&other).to_string(),
                ))
            }
        }
    }
}

fn parse_record(mut map: Map<String, Value>) -> Result<FieldRecord, ConfigurationError> {
    let label = match map.remove("label") {
        Some(Value::String(label)) => label,
        Some(other) => {
            return Err(ConfigurationError::InvalidAttribute {
                field: other.to_string(),
                attribute: "label".to_string(),
                reason: format!("expected a string, found {}", json_type(&other)),
            });
        }
        None => return Err(ConfigurationError::MissingLabel),
    };

    let required = match map.remove("required") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(required)) => required,
        Some(other) => {
            return Err(invalid_attribute(
                &label,
                "required",
                format!("expected a boolean, found {}", json_type(&other)),
            ));
        }
    };

    let choices = match map.remove("choices") {
        None => None,
        Some(Value::Null) => return Err(ConfigurationError::NullChoices(label)),
        Some(Value::Array(entries)) => Some(
            entries
                .into_iter()
                .map(|entry| parse_choice(&label, entry))
                .collect::<Result<Vec<Choice>, ConfigurationError>>()?,
        ),
        Some(Value::Object(entries)) => Some(
            entries
                .into_iter()
                .map(|(value, display)| {
                    scalar_to_string(&display)
                        .map(|display| Choice::new(value, display))
                        .ok_or_else(|| invalid_choice(&label, &display))
                })
                .collect::<Result<Vec<Choice>, ConfigurationError>>()?,
        ),
        Some(other) => {
            return Err(ConfigurationError::ChoicesNotIterable {
                field: label,
                found: json_type(&other).to_string(),
            });
        }
    };

    let widget = match map.remove("widget") {
        None | Some(Value::Null) => None,
        Some(Value::String(widget)) => Some(widget.parse()?),
        Some(other) => {
            return Err(invalid_attribute(
                &label,
                "widget",
                format!("expected a widget name, found {}", json_type(&other)),
            ));
        }
    };

    let ignore_list = match map.remove("ignore_list") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| {
                scalar_to_string(value).ok_or_else(|| {
                    invalid_attribute(
                        &label,
                        "ignore_list",
                        format!("expected scalar values, found {}", json_type(value)),
                    )
                })
            })
            .collect::<Result<Vec<String>, ConfigurationError>>()?,
        Some(other) => {
            return Err(invalid_attribute(
                &label,
                "ignore_list",
                format!("expected a list, found {}", json_type(&other)),
            ));
        }
    };

    if !map.is_empty() {
        debug!(
            field = %label,
            "ignoring unknown field attributes: {:?}",
            map.keys().collect::<Vec<&String>>()
        );
    }

    let record = FieldRecord {
        label,
        required,
        choices,
        widget,
        ignore_list,
    };
    record.check()?;

    Ok(record)
}

/// Accepts `["value", "display"]` pairs and `{"value": "display"}` entries.
fn parse_choice(field: &str, entry: Value) -> Result<Choice, ConfigurationError> {
    match &entry {
        Value::Array(pair) if pair.len() == 2 => {
            match (scalar_to_string(&pair[0]), scalar_to_string(&pair[1])) {
                (Some(value), Some(display)) => Ok(Choice::new(value, display)),
                _ => Err(invalid_choice(field, &entry)),
            }
        }
        Value::Object(single) if single.len() == 1 => single
            .iter()
            .next()
            .and_then(|(value, display)| {
                scalar_to_string(display).map(|display| Choice::new(value.clone(), display))
            })
            .ok_or_else(|| invalid_choice(field, &entry)),
        _ => Err(invalid_choice(field, &entry)),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn invalid_choice(field: &str, entry: &Value) -> ConfigurationError {
    ConfigurationError::InvalidChoice {
        field: field.to_string(),
        reason: format!("expected a (value, display) pair, found {entry}"),
    }
}

fn invalid_attribute(field: &str, attribute: &str, reason: String) -> ConfigurationError {
    ConfigurationError::InvalidAttribute {
        field: field.to_string(),
        attribute: attribute.to_string(),
        reason,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}
