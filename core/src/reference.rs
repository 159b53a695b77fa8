use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;

use crate::model::{find_collection, Collection, Token, TokenType};
use crate::naming::{code_safe_name, StringCase};
use crate::path::path_segments;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenNameStructure {
    NameOnly,
    #[default]
    PathAndName,
    CollectionPathAndName,
}

/// How token keys and references are spelled.
#[derive(Debug, Clone, Default)]
pub struct NamingOptions {
    pub structure: TokenNameStructure,
    pub global_prefix: Option<String>,
    pub use_type_prefixes: bool,
    pub type_prefixes: IndexMap<TokenType, String>,
    pub style: StringCase,
}
impl NamingOptions {
    /// The type prefix segment, if prefixes are enabled or `force` is set.
    pub fn token_prefix(&self, token_type: TokenType, force: bool) -> Option<String> {
        if !self.use_type_prefixes && !force {
            return None;
        }
        let prefix = self
            .type_prefixes
            .get(&token_type)
            .map(String::as_str)
            .unwrap_or_else(|| token_type.default_prefix());
        Some(prefix.to_string())
    }
}

/// The ordered key segments a token occupies in a document. References use
/// the same segments, so they resolve against generated files.
pub fn token_segments(token: &Token, collections: &[Collection], naming: &NamingOptions) -> Vec<String> {
    let mut segments = Vec::new();
    if let Some(prefix) = &naming.global_prefix {
        let prefix = code_safe_name(prefix, naming.style);
        if !prefix.is_empty() {
            segments.push(prefix);
        }
    }
    if let Some(prefix) = naming.token_prefix(token.token_type, false) {
        let prefix = code_safe_name(&prefix, naming.style);
        if !prefix.is_empty() {
            segments.push(prefix);
        }
    }
    match naming.structure {
        TokenNameStructure::NameOnly => {
            segments.extend(path_segments(&[], &token.name, naming.style));
        }
        TokenNameStructure::PathAndName => {
            segments.extend(path_segments(&token.token_path, &token.name, naming.style));
        }
        TokenNameStructure::CollectionPathAndName => {
            if let Some(collection) = find_collection(collections, token) {
                let segment = code_safe_name(&collection.name, naming.style);
                if !segment.is_empty() {
                    segments.push(segment);
                }
            }
            segments.extend(path_segments(&token.token_path, &token.name, naming.style));
        }
    }
    segments
}

/// `{a.b.c}` expression pointing at `token`.
pub fn reference_path(token: &Token, collections: &[Collection], naming: &NamingOptions) -> String {
    format!("{{{}}}", token_segments(token, collections, naming).iter().join("."))
}
