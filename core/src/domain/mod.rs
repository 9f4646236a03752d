pub mod common;
pub mod field_spec;
pub mod filter;
pub mod form;
pub mod search_bar;
