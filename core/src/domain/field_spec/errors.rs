use thiserror::Error;

/// A malformed field specification. Raised while a search bar is being
/// built and never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("fields should be strings or records, but you provided {0}")]
    InvalidFieldType(String),

    #[error("You should provide a label")]
    MissingLabel,

    #[error("invalid label: {0}")]
    InvalidLabel(String),

    #[error("choices of field '{0}' must not be null")]
    NullChoices(String),

    #[error("choices of field '{field}' must be a list or a mapping, but you provided {found}")]
    ChoicesNotIterable { field: String, found: String },

    #[error("invalid choice in field '{field}': {reason}")]
    InvalidChoice { field: String, reason: String },

    #[error("invalid attribute '{attribute}' in field '{field}': {reason}")]
    InvalidAttribute {
        field: String,
        attribute: String,
        reason: String,
    },

    #[error("unknown widget '{0}'")]
    UnknownWidget(String),

    #[error("unknown form method '{0}'")]
    UnknownMethod(String),

    #[error("unknown lookup '{0}'")]
    UnknownLookup(String),
}
