use std::collections::HashSet;

use tracing::warn;

use crate::model::{Theme, Token};

/// Copies `subset` with every override of `themes` applied in order, the
/// last theme winning. `all_tokens` is only consulted to report overrides
/// that point nowhere.
pub fn apply_themes(all_tokens: &[Token], subset: &[Token], themes: &[&Theme]) -> Vec<Token> {
    let known: HashSet<&str> = all_tokens.iter().map(|t| t.id.as_str()).collect();
    for theme in themes {
        for unknown in theme.overrides.iter().filter(|o| !known.contains(o.token_id.as_str())) {
            warn!(theme = %theme.name, token = %unknown.token_id, "Theme overrides an unknown token");
        }
    }
    subset
        .iter()
        .map(|token| {
            let mut token = token.clone();
            for theme in themes {
                if let Some(over) = theme.overrides.iter().find(|o| o.token_id == token.id) {
                    token.value = over.value.clone();
                    token.referenced_token_id = over.referenced_token_id.clone();
                    token.is_themed = true;
                }
            }
            token
        })
        .collect()
}

/// Tokens `theme` has an override for.
pub fn filter_themed_tokens(tokens: &[Token], theme: &Theme) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| theme.overrides_token(&token.id))
        .cloned()
        .collect()
}
