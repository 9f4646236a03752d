use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::field_spec::errors::ConfigurationError;

/// Lookup modifier appended to a filter key as `key__lookup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    Exact,       // equals (default)
    IExact,      // equals, case-insensitive
    Contains,    // LIKE %value%
    IContains,   // ILIKE %value%
    StartsWith,  // LIKE value%
    IStartsWith, // ILIKE value%
    EndsWith,    // LIKE %value
    IEndsWith,   // ILIKE %value
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FromStr for Lookup {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Lookup::Exact),
            "iexact" => Ok(Lookup::IExact),
            "contains" => Ok(Lookup::Contains),
            "icontains" => Ok(Lookup::IContains),
            "startswith" => Ok(Lookup::StartsWith),
            "istartswith" => Ok(Lookup::IStartsWith),
            "endswith" => Ok(Lookup::EndsWith),
            "iendswith" => Ok(Lookup::IEndsWith),
            "gt" => Ok(Lookup::Gt),
            "gte" => Ok(Lookup::Gte),
            "lt" => Ok(Lookup::Lt),
            "lte" => Ok(Lookup::Lte),
            _ => Err(ConfigurationError::UnknownLookup(s.to_string())),
        }
    }
}

/// `key == value` where the key may carry a lookup suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub key: String,
    pub value: String,
}

impl Predicate {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Splits the key into its column and lookup. A key without a known
    /// suffix is an exact match on the whole key.
    pub fn column_and_lookup(&self) -> (&str, Lookup) {
        if let Some((column, suffix)) = self.key.rsplit_once("__") {
            if let Ok(lookup) = suffix.parse::<Lookup>() {
                return (column, lookup);
            }
        }
        (self.key.as_str(), Lookup::Exact)
    }
}

/// AND-combination of predicates. Empty means "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterExpression {
    pub predicates: Vec<Predicate>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.predicates
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = self
            .predicates
            .iter()
            .map(|p| format!("('{}', '{}')", quote(&p.key), quote(&p.value)))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "(AND: {children})")
    }
}

fn quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// How a field name maps onto a filter key.
#[derive(Clone)]
pub enum Replacement {
    Literal(String),
    Derived(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Replacement {
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Replacement::Derived(Arc::new(f))
    }

    pub fn resolve(&self, name: &str) -> String {
        match self {
            Replacement::Literal(key) => key.clone(),
            Replacement::Derived(f) => f(name),
        }
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
            Replacement::Derived(_) => f.write_str("Derived(<fn>)"),
        }
    }
}

impl From<&str> for Replacement {
    fn from(key: &str) -> Self {
        Replacement::Literal(key.to_string())
    }
}

impl From<String> for Replacement {
    fn from(key: String) -> Self {
        Replacement::Literal(key)
    }
}

/// Field name to filter key replacements
#[derive(Debug, Clone, Default)]
pub struct Replacements(HashMap<String, Replacement>);

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, replacement: impl Into<Replacement>) -> Self {
        self.insert(name, replacement);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, replacement: impl Into<Replacement>) {
        self.0.insert(name.into(), replacement.into());
    }

    pub fn get(&self, name: &str) -> Option<&Replacement> {
        self.0.get(name)
    }

    /// The filter key for a field, falling back to the field name.
    pub fn key_for(&self, name: &str) -> String {
        self.0
            .get(name)
            .map(|replacement| replacement.resolve(name))
            .unwrap_or_else(|| name.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<Replacement>> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, replacement)| (name.into(), replacement.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for Replacements {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_parse() {
        assert_eq!("icontains".parse::<Lookup>(), Ok(Lookup::IContains));
        assert_eq!("gte".parse::<Lookup>(), Ok(Lookup::Gte));
        assert_eq!(
            "regex".parse::<Lookup>(),
            Err(ConfigurationError::UnknownLookup("regex".to_string()))
        );
    }

    #[test]
    fn test_predicate_column_and_lookup() {
        assert_eq!(
            Predicate::new("username__icontains", "a").column_and_lookup(),
            ("username", Lookup::IContains)
        );
        assert_eq!(
            Predicate::new("username", "a").column_and_lookup(),
            ("username", Lookup::Exact)
        );
        assert_eq!(
            Predicate::new("author__name", "a").column_and_lookup(),
            ("author__name", Lookup::Exact)
        );
    }

    #[test]
    fn test_expression_display() {
        assert_eq!(FilterExpression::new().to_string(), "(AND: )");
        let expression = FilterExpression::new()
            .and(Predicate::new("username", "arsham"))
            .and(Predicate::new("email", "x"));
        assert_eq!(
            expression.to_string(),
            "(AND: ('username', 'arsham'), ('email', 'x'))"
        );
        assert_eq!(expression.get("email"), Some("x"));
        assert_eq!(expression.len(), 2);
    }

    #[test]
    fn test_display_quotes_values() {
        let expression = FilterExpression::new().and(Predicate::new("name", "o'neil"));
        assert_eq!(expression.to_string(), r"(AND: ('name', 'o\'neil'))");
    }

    #[test]
    fn test_replacements_resolve() {
        let replacements = Replacements::new()
            .with("name", "username")
            .with("mail", Replacement::derived(|name| format!("user__{name}")));
        assert_eq!(replacements.key_for("name"), "username");
        assert_eq!(replacements.key_for("mail"), "user__mail");
        assert_eq!(replacements.key_for("age"), "age");
        assert_eq!(replacements.len(), 2);
    }

    #[test]
    fn test_replacements_from_map() {
        let map = HashMap::from([("name".to_string(), "username".to_string())]);
        let replacements = Replacements::from(map);
        assert_eq!(replacements.key_for("name"), "username");
    }
}
