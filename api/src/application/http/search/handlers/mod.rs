pub mod get_filters;
pub mod homepage;
