//! Turns flat design tokens into nested Style Dictionary documents.
//!
//! [`process_tokens`] builds one document from a token list; callers run it
//! once per token type (and once per theme for nested theme output) and
//! [`Document::merge`] the results.

pub mod error;
pub mod hierarchy;
pub mod model;
pub mod naming;
pub mod path;
pub mod processor;
pub mod reference;
pub mod registry;
pub mod theme;
pub mod tree;
pub mod value;

pub use error::{CoreError, Result};
pub use model::{hydrate_token_paths, Brand, Collection, Theme, Token, TokenGroup, TokenOverride, TokenType};
pub use naming::{code_safe_name, theme_identifier, StringCase};
pub use processor::{process_tokens, ProcessOptions, TokenLookup, TokenSortOrder, ValueFormatter, ValueLayout};
pub use reference::{reference_path, NamingOptions, TokenNameStructure};
pub use registry::NameRegistry;
pub use theme::{apply_themes, filter_themed_tokens};
pub use tree::{deep_merge, merge_into, Branch, Document, Leaf, LeafValue, Node};
pub use value::{SourceValue, TokenValue, Unit};
