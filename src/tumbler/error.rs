use crate::model::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for an inventory that could not be loaded or failed validation.
pub const EXIT_LOAD: i32 = 2;
/// Exit code for an internal combinator invariant violation.
pub const EXIT_COMBINATOR: i32 = 3;
/// Exit code for output that could not be created or written.
pub const EXIT_RESOURCE: i32 = 4;
/// Exit code for settings that could not be loaded.
pub const EXIT_CONFIG: i32 = 5;
/// Exit code when the operator stopped the run.
pub const EXIT_INTERRUPTED: i32 = 130;

/// User-input faults in an inventory document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing category: {0}")]
    MissingCategory(Category),

    #[error("Category {0} has no parts")]
    EmptyCategory(Category),

    #[error("Malformed part {token:?} in {category}: {reason}")]
    MalformedPart {
        category: Category,
        token: String,
        reason: String,
    },

    #[error("Duplicate part {name}-{size} in {category}")]
    DuplicatePart {
        category: Category,
        name: String,
        size: u32,
    },

    #[error(
        "Not enough {category} for a {lock_size}-chamber lock: {available} available, {lock_size} needed"
    )]
    InsufficientParts {
        category: Category,
        available: u64,
        lock_size: usize,
    },

    #[error("Lock size must be at least 1")]
    ZeroLockSize,
}

#[derive(Error, Debug)]
pub enum TumblerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not read inventory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse inventory: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Combinator(String),

    #[error("Could not write {path}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<confique::Error> for TumblerError {
    fn from(err: confique::Error) -> Self {
        TumblerError::Config(err.to_string())
    }
}

impl TumblerError {
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TumblerError::Resource {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this class of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            TumblerError::Validation(_) | TumblerError::Read { .. } | TumblerError::Yaml(_) => {
                EXIT_LOAD
            }
            TumblerError::Combinator(_) => EXIT_COMBINATOR,
            TumblerError::Resource { .. }
            | TumblerError::Io(_)
            | TumblerError::Serialization(_) => EXIT_RESOURCE,
            TumblerError::Config(_) => EXIT_CONFIG,
        }
    }
}

pub type Result<T> = std::result::Result<T, TumblerError>;
