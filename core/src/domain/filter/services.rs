use tracing::debug;

use crate::domain::{field_spec::entities::FieldSpec, form::entities::SearchForm};

use super::value_objects::{FilterExpression, Predicate, Replacements};

/// Folds the cleaned values of `specs` into an AND filter.
///
/// When `names` is non-empty only the specs with those names take part, in
/// the order of `specs`. Empty values and values on a spec's ignore list are
/// skipped. A non-blank `lookup_string` is appended to every key as
/// `key__lookup`.
pub fn build_filters(
    specs: &[FieldSpec],
    form: &SearchForm,
    replacements: &Replacements,
    names: &[&str],
    lookup_string: &str,
) -> FilterExpression {
    let lookup = lookup_string.trim().to_lowercase();

    let expression = specs
        .iter()
        .filter(|spec| names.is_empty() || names.contains(&spec.name()))
        .filter_map(|spec| {
            let value = form.cleaned_value(spec.name());
            if value.is_empty() || spec.ignore_list().contains(&value) {
                return None;
            }

            let key = replacements.key_for(spec.name());
            let key = if lookup.is_empty() {
                key
            } else {
                format!("{key}__{lookup}")
            };
            Some(Predicate::new(key, value))
        })
        .fold(FilterExpression::new(), FilterExpression::and);

    debug!(predicates = expression.len(), "built search filters");
    expression
}
