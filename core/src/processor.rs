use std::collections::HashMap;

use itertools::Itertools;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::Result;
use crate::hierarchy::token_hierarchy;
use crate::model::{find_collection, Collection, Token};
use crate::reference::{reference_path, token_segments, NamingOptions};
use crate::registry::NameRegistry;
use crate::tree::{merge_into, Branch, Document, Leaf, LeafValue};

/// Every token of a design system by id, for reference resolution.
pub type TokenLookup<'a> = HashMap<&'a str, &'a Token>;

/// Turns a token's value into the string written to `value`.
///
/// `reference` yields the expression for another token and should be used
/// whenever the token aliases one.
pub trait ValueFormatter {
    fn format(&self, token: &Token, lookup: &TokenLookup<'_>, reference: &dyn Fn(&Token) -> String) -> String;
}
impl<F> ValueFormatter for F
where
    F: Fn(&Token, &TokenLookup<'_>, &dyn Fn(&Token) -> String) -> String,
{
    fn format(&self, token: &Token, lookup: &TokenLookup<'_>, reference: &dyn Fn(&Token) -> String) -> String {
        self(token, lookup, reference)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenSortOrder {
    #[default]
    Default,
    Alphabetical,
}

/// Where a token's value lands inside its leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValueLayout {
    /// `{ value, type, collection }` directly on the leaf.
    #[default]
    Flat,
    /// `{ <theme>: { value, type, collection } }`.
    Themed(String),
}

#[derive(Debug, Clone)]
pub struct ProcessOptions<'a> {
    pub naming: &'a NamingOptions,
    pub layout: ValueLayout,
    pub sort_order: TokenSortOrder,
    pub generate_empty_files: bool,
    pub show_descriptions: bool,
    pub disclaimer: Option<&'a str>,
}

/// Builds one document out of `tokens`.
///
/// Returns `Ok(None)` when there is nothing to write and empty files are not
/// wanted. `all_tokens` backs reference resolution so aliases to tokens
/// outside `tokens` still resolve. `registry` is reset first.
pub fn process_tokens(
    tokens: &[Token],
    all_tokens: &[Token],
    collections: &[Collection],
    formatter: &dyn ValueFormatter,
    options: &ProcessOptions<'_>,
    registry: &mut NameRegistry,
) -> Result<Option<Document>> {
    registry.reset();
    if tokens.is_empty() && !options.generate_empty_files {
        debug!("No tokens, skipping document");
        return Ok(None);
    }

    let lookup: TokenLookup<'_> = all_tokens.iter().map(|t| (t.id.as_str(), t)).collect();
    let naming = options.naming;
    let reference = |t: &Token| reference_path(t, collections, naming);

    let mut ordered = tokens.iter().collect_vec();
    if options.sort_order == TokenSortOrder::Alphabetical {
        ordered.sort_by_cached_key(|t| sort_key(&token_segments(t, collections, naming).iter().join(".")));
    }

    let mut root = Branch::new();
    for token in ordered {
        let value = formatter.format(token, &lookup, &reference);
        trace!(token = %token.id, %value, "Formatted token");
        let leaf = token_leaf(&value, token, collections, options);
        let branch = token_hierarchy(token, leaf, collections, naming, registry)?;
        merge_into(&mut root, branch)?;
    }
    debug!(tokens = tokens.len(), keys = root.len(), "Assembled document");

    Ok(Some(Document {
        disclaimer: options.disclaimer.map(String::from),
        root,
    }))
}

/// Locale-like ordering: transliterated and case-folded first, raw text
/// breaks ties.
fn sort_key(name: &str) -> (String, String) {
    (deunicode::deunicode(name).to_lowercase(), name.to_string())
}

fn token_leaf(value: &str, token: &Token, collections: &[Collection], options: &ProcessOptions<'_>) -> Leaf {
    let value = LeafValue {
        value: value.replace(['\'', '"'], ""),
        type_: options
            .naming
            .token_prefix(token.token_type, true)
            .unwrap_or_default(),
        collection: find_collection(collections, token).map(|c| c.name.clone()),
    };
    let description = token
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| options.show_descriptions && !d.is_empty())
        .map(String::from);
    let leaf = match &options.layout {
        ValueLayout::Flat => Leaf::base(value),
        ValueLayout::Themed(theme) => Leaf::themed(theme.clone(), value),
    };
    leaf.with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenType;
    use crate::value::TokenValue;
    use serde_json::json;

    fn raw_value(token: &Token, _: &TokenLookup<'_>, _: &dyn Fn(&Token) -> String) -> String {
        match token.literal() {
            TokenValue::Raw(raw) => raw,
            TokenValue::Dimension { measure, unit } => format!("{measure}{}", unit.suffix()),
            TokenValue::Color(color) => color.to_hex_string(),
        }
    }

    fn tokens(value: serde_json::Value) -> Vec<Token> {
        serde_json::from_value(value).unwrap()
    }

    fn options(naming: &NamingOptions) -> ProcessOptions<'_> {
        ProcessOptions {
            naming,
            layout: ValueLayout::Flat,
            sort_order: TokenSortOrder::Default,
            generate_empty_files: false,
            show_descriptions: true,
            disclaimer: None,
        }
    }

    #[test]
    fn empty_input_is_skipped_unless_requested() {
        let naming = NamingOptions::default();
        let mut options = options(&naming);
        let mut registry = NameRegistry::new();
        assert!(process_tokens(&[], &[], &[], &raw_value, &options, &mut registry)
            .unwrap()
            .is_none());

        options.generate_empty_files = true;
        options.disclaimer = Some("Generated");
        let document = process_tokens(&[], &[], &[], &raw_value, &options, &mut registry)
            .unwrap()
            .unwrap();
        assert_eq!(document.to_json(0).unwrap(), r#"{"_comment":"Generated"}"#);
    }

    #[test]
    fn quotes_are_stripped_and_descriptions_trimmed() {
        let tokens = tokens(json!([{
            "id": "f", "name": "body", "tokenPath": ["font"], "tokenType": "FontFamily",
            "description": "  Body copy  ", "value": "'Inter', \"Helvetica\""
        }]));
        let naming = NamingOptions::default();
        let document = process_tokens(&tokens, &tokens, &[], &raw_value, &options(&naming), &mut NameRegistry::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({ "font": { "body": {
                "value": "Inter, Helvetica", "type": "font-family", "description": "Body copy"
            } } })
        );
    }

    #[test]
    fn descriptions_can_be_hidden() {
        let tokens = tokens(json!([{
            "id": "f", "name": "body", "tokenType": "FontFamily", "description": "Body", "value": "Inter"
        }]));
        let naming = NamingOptions::default();
        let mut options = options(&naming);
        options.show_descriptions = false;
        let document = process_tokens(&tokens, &tokens, &[], &raw_value, &options, &mut NameRegistry::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({ "body": { "value": "Inter", "type": "font-family" } })
        );
    }

    #[test]
    fn references_use_the_resolver() {
        let tokens = tokens(json!([
            { "id": "base", "name": "40", "tokenPath": ["grid", "space"], "tokenType": "Space", "value": "4px" },
            { "id": "gap", "name": "small", "tokenPath": ["space", "gap"], "tokenType": "Space",
              "referencedTokenId": "base", "value": "4px" }
        ]));
        fn by_reference(token: &Token, lookup: &TokenLookup<'_>, reference: &dyn Fn(&Token) -> String) -> String {
            match token.referenced_token_id.as_deref().and_then(|id| lookup.get(id)) {
                Some(target) => reference(target),
                None => "4px".to_string(),
            }
        }
        let naming = NamingOptions::default();
        // Only the aliasing token is exported; its target still resolves.
        let document = process_tokens(&tokens[1..], &tokens, &[], &by_reference, &options(&naming), &mut NameRegistry::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({ "space": { "gap": { "small": { "value": "{grid.space._40}", "type": "space" } } } })
        );
    }

    #[test]
    fn alphabetical_order_uses_display_names() {
        let tokens = tokens(json!([
            { "id": "1", "name": "zeta", "tokenType": "Space", "value": "1" },
            { "id": "2", "name": "Émile", "tokenType": "Space", "value": "2" },
            { "id": "3", "name": "beta", "tokenType": "Space", "value": "3" }
        ]));
        let naming = NamingOptions::default();
        let mut options = options(&naming);
        options.sort_order = TokenSortOrder::Alphabetical;
        let document = process_tokens(&tokens, &tokens, &[], &raw_value, &options, &mut NameRegistry::new())
            .unwrap()
            .unwrap();
        assert_eq!(document.root.keys().collect_vec(), vec!["beta", "emile", "zeta"]);
    }

    #[test]
    fn registry_is_reset_per_document() {
        let tokens = tokens(json!([
            { "id": "1", "name": "gap", "tokenType": "Space", "value": "1" },
            { "id": "2", "name": "gap", "tokenType": "Space", "value": "2" }
        ]));
        let naming = NamingOptions::default();
        let mut registry = NameRegistry::new();
        registry.claim("gap");
        for _ in 0..2 {
            let document = process_tokens(&tokens, &tokens, &[], &raw_value, &options(&naming), &mut registry)
                .unwrap()
                .unwrap();
            assert_eq!(document.root.keys().collect_vec(), vec!["gap", "gap-2"]);
        }
    }

    #[test]
    fn suffixed_names_never_collide_with_later_tokens() {
        let tokens = tokens(json!([
            { "id": "1", "name": "gap", "tokenPath": ["space"], "tokenType": "Space", "value": "1" },
            { "id": "2", "name": "gap", "tokenPath": ["space"], "tokenType": "Space", "value": "2px" },
            { "id": "3", "name": "gap 2", "tokenPath": ["space"], "tokenType": "Space", "value": "3" }
        ]));
        let naming = NamingOptions {
            style: crate::naming::StringCase::KebabCase,
            ..Default::default()
        };
        let document = process_tokens(&tokens, &tokens, &[], &raw_value, &options(&naming), &mut NameRegistry::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({ "space": {
                "gap": { "value": "1", "type": "space" },
                "gap-2": { "value": "2px", "type": "space" },
                "gap-2-2": { "value": "3", "type": "space" }
            } })
        );
    }

    #[test]
    fn type_field_ignores_prefix_toggle() {
        let tokens = tokens(json!([{ "id": "1", "name": "gap", "tokenType": "ZIndex", "value": "1" }]));
        let naming = NamingOptions::default();
        let document = process_tokens(&tokens, &tokens, &[], &raw_value, &options(&naming), &mut NameRegistry::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({ "gap": { "value": "1", "type": "z-index" } })
        );
        assert_eq!(tokens[0].token_type, TokenType::ZIndex);
    }
}
