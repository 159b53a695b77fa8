use std::path::Path;

use serde::Deserialize;
use style_dictionary_core::{Brand, Collection, Theme, Token, TokenGroup};

use crate::error::ExporterError;

/// Everything an export reads from a design system version.
pub trait DesignSystemSource {
    fn tokens(&self) -> Result<Vec<Token>, ExporterError>;
    fn token_groups(&self) -> Result<Vec<TokenGroup>, ExporterError>;
    fn token_collections(&self) -> Result<Vec<Collection>, ExporterError>;
    fn themes(&self) -> Result<Vec<Theme>, ExporterError>;
    fn brands(&self) -> Result<Vec<Brand>, ExporterError>;
}

/// A design system version dumped to a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub tokens: Vec<Token>,
    pub token_groups: Vec<TokenGroup>,
    pub token_collections: Vec<Collection>,
    pub themes: Vec<Theme>,
    pub brands: Vec<Brand>,
}
impl Snapshot {
    pub fn from_json(text: &str) -> Result<Self, ExporterError> {
        Ok(serde_json::from_str(text)?)
    }
    pub fn load(path: &Path) -> Result<Self, ExporterError> {
        let text = std::fs::read_to_string(path).map_err(|source| ExporterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
impl DesignSystemSource for Snapshot {
    fn tokens(&self) -> Result<Vec<Token>, ExporterError> {
        Ok(self.tokens.clone())
    }
    fn token_groups(&self) -> Result<Vec<TokenGroup>, ExporterError> {
        Ok(self.token_groups.clone())
    }
    fn token_collections(&self) -> Result<Vec<Collection>, ExporterError> {
        Ok(self.token_collections.clone())
    }
    fn themes(&self) -> Result<Vec<Theme>, ExporterError> {
        Ok(self.themes.clone())
    }
    fn brands(&self) -> Result<Vec<Brand>, ExporterError> {
        Ok(self.brands.clone())
    }
}
