pub mod query_extractor;
pub mod search;
pub mod server;
