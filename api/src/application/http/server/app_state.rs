use std::sync::Arc;

use searchbar_core::domain::{
    field_spec::entities::{FieldRecord, FieldSpec},
    filter::value_objects::Replacements,
    search_bar::{ports::SearchBarView, value_objects::FormMethod},
};

use crate::args::Args;

/// The search bar this server exposes, as configured at startup.
#[derive(Debug, Clone)]
pub struct ConfiguredSearch {
    pub fields: Vec<FieldSpec>,
    pub replacements: Replacements,
    pub method: FormMethod,
    pub table: String,
}

impl ConfiguredSearch {
    pub fn demo_fields() -> Vec<FieldSpec> {
        vec![
            "name".into(),
            FieldRecord::new("age").into(),
            FieldRecord::new("order_by")
                .choices([("asc", "ASC"), ("desc", "DESC")])
                .into(),
        ]
    }
}

impl SearchBarView for ConfiguredSearch {
    fn searchbar_fields(&self) -> Vec<FieldSpec> {
        self.fields.clone()
    }

    fn searchbar_replacements(&self) -> Replacements {
        self.replacements.clone()
    }

    fn searchbar_method(&self) -> FormMethod {
        self.method
    }
}

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub search: Arc<ConfiguredSearch>,
}

impl AppState {
    pub fn new(args: Arc<Args>, search: ConfiguredSearch) -> Self {
        Self {
            args,
            search: Arc::new(search),
        }
    }
}
