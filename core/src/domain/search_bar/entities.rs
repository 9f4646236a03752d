use std::fmt;

use tracing::{debug, warn};

use crate::domain::{
    common::{escape_html, humanize},
    field_spec::{
        entities::{FieldRecord, FieldSpec},
        errors::ConfigurationError,
        services::IntoFieldSpecs,
    },
    filter::{
        services::build_filters,
        value_objects::{FilterExpression, Replacements},
    },
    form::{
        entities::{FieldDefinition, REQUIRED_MESSAGE, SearchForm},
        render::BoundField,
    },
};

use super::{
    ports::{ParamSource, ParamSourceExt},
    value_objects::{AS_FORM_KEY, CSRF_FIELD_NAME, FieldValue, FormMethod},
};

/// A search form bound to one request.
///
/// ```ignore
/// let mut search_bar = SearchBar::new(&params, ["name", "age"])?;
/// if search_bar.is_valid() {
///     let name = search_bar.get("name");
///     let condition = search_bar.filters();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SearchBar {
    fields: Vec<FieldSpec>,
    form: SearchForm,
    replacements: Replacements,
    method: FormMethod,
    action: String,
    csrf_token: Option<String>,
    submit_label: String,
    errors: Vec<String>,
}

impl SearchBar {
    pub fn new<P>(params: &P, fields: impl IntoFieldSpecs) -> Result<Self, ConfigurationError>
    where
        P: ParamSource + ?Sized,
    {
        let fields = fields.into_field_specs()?;
        let form = SearchForm::new(params.search_data().clone(), &fields);

        debug!(fields = fields.len(), "search bar created");

        Ok(Self {
            fields,
            form,
            replacements: Replacements::new(),
            method: FormMethod::default(),
            action: String::new(),
            csrf_token: None,
            submit_label: "Search".to_string(),
            errors: Vec::new(),
        })
    }

    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = replacements;
        self
    }

    pub fn with_method(mut self, method: FormMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn method(&self) -> FormMethod {
        self.method
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn replacements(&self) -> &Replacements {
        &self.replacements
    }

    /// Messages collected by the last validity check.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True when the form is valid and every field declared as required has a
    /// value.
    pub fn is_valid(&mut self) -> bool {
        self.is_valid_for(&[])
    }

    /// True when the form is valid and every named field has a value. The
    /// `required` declarations of the fields are not consulted. With no names
    /// this is [`SearchBar::is_valid`].
    pub fn is_valid_for(&mut self, names: &[&str]) -> bool {
        self.errors.clear();

        let form_errors = self.form.errors();
        let mut valid = form_errors.is_empty();
        self.errors.extend(
            form_errors
                .iter()
                .map(|error| format!("{}: {}", error.field, error.message)),
        );

        let demanded: Vec<&str> = if names.is_empty() {
            self.fields
                .iter()
                .filter(|spec| spec.is_required())
                .map(FieldSpec::name)
                .collect()
        } else {
            names.to_vec()
        };

        for name in demanded {
            if !self.form.cleaned_value(name).is_empty() {
                continue;
            }
            valid = false;
            if !form_errors.iter().any(|error| error.field == name) {
                self.errors.push(format!("{name}: {REQUIRED_MESSAGE}"));
            }
        }

        debug!(valid, errors = self.errors.len(), "search bar validated");
        valid
    }

    /// Cleaned value of a field, or an empty string when it is unknown or has
    /// no valid value. `"as_form"` answers with the rendered form.
    pub fn get(&self, name: &str) -> String {
        if name == AS_FORM_KEY {
            return self.render();
        }
        self.form.cleaned_value(name)
    }

    /// Adds a field, or replaces the field with the same name.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();

        let (spec, definition) = match value.into() {
            FieldValue::Label(label) => (
                FieldSpec::Name(name.clone()),
                FieldDefinition::text(name.clone(), label, false),
            ),
            FieldValue::Choices(choices) => (
                FieldSpec::Name(name.clone()),
                FieldDefinition::choice(name.clone(), humanize(&name), choices, false),
            ),
            FieldValue::Record(record) => {
                record.check()?;
                let label = humanize(&record.label);
                let spec = FieldSpec::Record(FieldRecord {
                    label: name.clone(),
                    ..record
                });
                let mut definition = FieldDefinition::from_spec(&spec);
                definition.label = label;
                (spec, definition)
            }
        };

        match self.fields.iter_mut().find(|s| s.name() == name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self.form.insert(definition);

        debug!(field = %name, "search bar field set");
        Ok(())
    }

    /// Removes a field. Later checks and filters behave as if it was never
    /// declared.
    pub fn remove(&mut self, name: &str) -> Option<FieldDefinition> {
        self.fields.retain(|spec| spec.name() != name);
        self.form.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.form.field(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.form.fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.form.fields().is_empty()
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        self.form.fields()
    }

    pub fn iter(&self) -> impl Iterator<Item = BoundField<'_>> {
        self.form.bound_fields()
    }

    /// The filter of every field that has a value.
    pub fn filters(&self) -> FilterExpression {
        self.get_filters(&[], "")
    }

    /// The filter of the named fields (all fields when `names` is empty),
    /// with `lookup_string` appended to every key when it is not blank.
    pub fn get_filters(&self, names: &[&str], lookup_string: &str) -> FilterExpression {
        build_filters(
            &self.fields,
            &self.form,
            &self.replacements,
            names,
            lookup_string,
        )
    }

    /// The complete `<form>` element.
    pub fn render(&self) -> String {
        let mut html = format!(
            r#"<form method="{}" action="{}">"#,
            self.method,
            escape_html(&self.action)
        );
        html.push('\n');

        if self.method == FormMethod::Post {
            if self.csrf_token.is_none() {
                warn!("rendering a POST search form without a CSRF token");
            }
            html.push_str(&format!(
                r#"<input type="hidden" name="{CSRF_FIELD_NAME}" value="{}" />"#,
                escape_html(self.csrf_token.as_deref().unwrap_or_default())
            ));
            html.push('\n');
        }

        html.push_str("<table>\n");
        html.push_str(&self.form.as_table());
        html.push_str("\n</table>\n");
        html.push_str(&format!(
            r#"<input type="submit" value="{}" />"#,
            escape_html(&self.submit_label)
        ));
        html.push_str("\n</form>");
        html
    }
}

/// Renders the field widgets only, for embedding in a caller's own form.
impl fmt::Display for SearchBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.form, f)
    }
}
