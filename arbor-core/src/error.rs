use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("`{segment}` does not match 'a-z0-9_-' in {path}")]
    InvalidSegment { segment: String, path: String },

    #[error("namespace path `{path}` is used as both a branch and a leaf")]
    ShapeConflict { path: String },

    #[error("repository resolution failed: {0}")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
