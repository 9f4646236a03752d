pub mod condition;

pub use condition::{apply_to, filter_select, preview_sql, to_condition};
