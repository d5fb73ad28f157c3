use cosmo_core::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog must be a JSON array of product records, found {found}")]
    NotAnArray { found: &'static str },

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}
