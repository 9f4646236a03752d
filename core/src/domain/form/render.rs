//! HTML rendering of search forms.
//!
//! Element ids follow the `id_<field>` convention and input names are the raw
//! field names, so templates and client code can address fields directly.

use std::fmt::{self, Write};

use crate::domain::{common::escape_html, field_spec::value_objects::Widget};

use super::entities::{FieldDefinition, FieldKind, SearchForm};

/// A field viewed together with the form it is bound to.
#[derive(Debug, Clone, Copy)]
pub struct BoundField<'a> {
    form: &'a SearchForm,
    field: &'a FieldDefinition,
}

impl<'a> BoundField<'a> {
    pub fn new(form: &'a SearchForm, field: &'a FieldDefinition) -> Self {
        Self { form, field }
    }

    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    pub fn label(&self) -> &'a str {
        &self.field.label
    }

    pub fn definition(&self) -> &'a FieldDefinition {
        self.field
    }

    pub fn auto_id(&self) -> String {
        format!("id_{}", self.field.name)
    }

    /// The submitted value, as typed by the user.
    pub fn value(&self) -> Option<&'a str> {
        self.form.raw_value(&self.field.name)
    }

    pub fn errors(&self) -> Vec<String> {
        self.form.field_errors(self.field)
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.field.kind, FieldKind::Text { widget } if widget.is_hidden())
    }

    pub fn label_tag(&self) -> String {
        format!(
            r#"<label for="{}">{}:</label>"#,
            escape_html(&self.auto_id()),
            escape_html(&self.field.label)
        )
    }

    pub fn errors_html(&self) -> String {
        let errors = self.errors();
        if errors.is_empty() {
            return String::new();
        }
        let items: String = errors
            .iter()
            .map(|e| format!("<li>{}</li>", escape_html(e)))
            .collect();
        format!(r#"<ul class="errorlist">{items}</ul>"#)
    }

    pub fn widget_html(&self) -> String {
        let id = escape_html(&self.auto_id());
        let name = escape_html(&self.field.name);
        let value = self.value().unwrap_or_default();

        match &self.field.kind {
            FieldKind::Choice { choices } => {
                let mut html = format!(r#"<select id="{id}" name="{name}">"#);
                for choice in choices {
                    let selected = if choice.value == value {
                        r#" selected="selected""#
                    } else {
                        ""
                    };
                    // writing into a String cannot fail
                    let _ = write!(
                        html,
                        "\n<option value=\"{}\"{selected}>{}</option>",
                        escape_html(&choice.value),
                        escape_html(&choice.display)
                    );
                }
                html.push_str("\n</select>");
                html
            }
            FieldKind::Text {
                widget: Widget::Textarea,
            } => format!(
                r#"<textarea cols="40" id="{id}" name="{name}" rows="10">{}</textarea>"#,
                escape_html(value)
            ),
            FieldKind::Text { widget } => {
                let input_type = widget.input_type().unwrap_or("text");
                if value.is_empty() {
                    format!(r#"<input id="{id}" name="{name}" type="{input_type}" />"#)
                } else {
                    format!(
                        r#"<input id="{id}" name="{name}" type="{input_type}" value="{}" />"#,
                        escape_html(value)
                    )
                }
            }
        }
    }

    /// One `<tr>` row with label, errors and widget.
    pub fn as_table_row(&self) -> String {
        format!(
            "<tr><th>{}</th><td>{}{}</td></tr>",
            self.label_tag(),
            self.errors_html(),
            self.widget_html()
        )
    }
}

impl fmt::Display for BoundField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.widget_html())
    }
}

impl SearchForm {
    pub fn bound_fields(&self) -> impl Iterator<Item = BoundField<'_>> {
        self.fields()
            .iter()
            .map(move |field| BoundField::new(self, field))
    }

    pub fn bound_field(&self, name: &str) -> Option<BoundField<'_>> {
        self.field(name).map(|field| BoundField::new(self, field))
    }

    /// Renders the fields as table rows. Hidden fields follow the rows.
    pub fn as_table(&self) -> String {
        let (hidden, visible): (Vec<BoundField<'_>>, Vec<BoundField<'_>>) =
            self.bound_fields().partition(BoundField::is_hidden);

        let mut rows: Vec<String> = visible.iter().map(BoundField::as_table_row).collect();
        rows.extend(
            hidden
                .iter()
                .map(|field| format!("{}{}", field.errors_html(), field.widget_html())),
        );
        rows.join("\n")
    }
}

impl fmt::Display for SearchForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_table())
    }
}
