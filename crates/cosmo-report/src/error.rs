use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move finished export into place at {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no free file name for {stem} in {dir} after {attempts} attempts")]
    NameExhausted {
        dir: String,
        stem: String,
        attempts: usize,
    },

    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}
