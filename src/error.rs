use style_dictionary_core::CoreError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    #[error("Unable to find brand {0}.")]
    BrandNotFound(String),

    #[error("Unable to find theme {0}")]
    ThemeNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Document generation failed: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid design system snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
