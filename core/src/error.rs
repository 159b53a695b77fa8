/// Failures while assembling a document.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Cannot merge a token leaf and a group at `{path}`")]
    ShapeConflict { path: String },

    #[error("Token {id} ({name:?}) does not produce any usable key")]
    UnnamedToken { id: String, name: String },

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
