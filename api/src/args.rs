use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};
use searchbar_core::domain::search_bar::value_objects::FormMethod;

#[derive(Debug, Clone, Parser)]
#[command(name = "searchbar-api", version, about = "Serves a configurable search bar")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub search: SearchArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix every route is mounted under, e.g. `/search`
    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SearchArgs {
    /// JSON file holding the field specification. Demo fields are used when unset.
    #[arg(long = "fields-file", env = "SEARCHBAR_FIELDS_FILE")]
    pub fields_file: Option<PathBuf>,

    /// Field to column replacement, as `field=column`
    #[arg(
        long = "replacement",
        env = "SEARCHBAR_REPLACEMENTS",
        value_delimiter = ',',
        value_parser = parse_replacement
    )]
    pub replacements: Vec<(String, String)>,

    #[arg(long = "method", env = "SEARCHBAR_METHOD", default_value = "post")]
    pub method: FormMethod,

    /// Table named in the SQL previews
    #[arg(long = "table", env = "SEARCHBAR_TABLE", default_value = "people")]
    pub table: String,
}

fn parse_replacement(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((field, column)) if !field.trim().is_empty() && !column.trim().is_empty() => {
            Ok((field.trim().to_string(), column.trim().to_string()))
        }
        _ => Err(format!("expected `field=column`, got `{value}`")),
    }
}
