use std::path::PathBuf;

/// Result type used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while loading tables and building generated outputs.
///
/// Every variant is fatal to a run: the driver aborts before any output
/// file is touched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file does not exist
    #[error("Table not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Structural violation of the header/row contract
    #[error("Malformed table {}: {reason}", path.display())]
    MalformedTable { path: PathBuf, reason: String },

    /// A declared required column is absent from the header
    #[error("Required column '{column}' missing from {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// The header declares the same column twice
    #[error("Duplicate column '{column}' in {}", path.display())]
    DuplicateDefinition { path: PathBuf, column: String },

    /// Column lookup by name failed
    #[error("Unknown column '{column}' in table {table}")]
    UnknownColumn { table: String, column: String },

    /// Row lookup by index failed
    #[error("Row {index} out of range for table {table} ({rows} rows)")]
    RowOutOfRange {
        table: String,
        index: usize,
        rows: usize,
    },

    /// A key was not present in a mapping the caller indexed into
    #[error("{what} not found: {key}")]
    Lookup { what: &'static str, key: String },

    /// I/O error tied to a path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn lookup(what: &'static str, key: impl Into<String>) -> Self {
        Error::Lookup {
            what,
            key: key.into(),
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::MalformedTable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
