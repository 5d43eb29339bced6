use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaxonomyError>;

/// Loading a standard is the one fatal failure mode in the engine: a process
/// must never come up with a partial or garbled index.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Standard document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Standard document is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Standard document contains no controls")]
    EmptyDocument,

    #[error("Category '{code}' maps to conflicting names: '{first}' vs '{second}'")]
    CategoryNameConflict {
        code: String,
        first: String,
        second: String,
    },

    #[error("Subcategory '{code}' maps to conflicting names: '{first}' vs '{second}'")]
    SubcategoryNameConflict {
        code: String,
        first: String,
        second: String,
    },

    #[error("Duplicate control id '{0}'")]
    DuplicateControlId(String),
}
