use serde::Deserialize;

use crate::value::{SourceValue, TokenValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TokenType {
    Color,
    Border,
    Gradient,
    Shadow,
    Typography,
    Dimension,
    Size,
    Space,
    Opacity,
    FontSize,
    LineHeight,
    LetterSpacing,
    ParagraphSpacing,
    BorderWidth,
    Radius,
    Duration,
    ZIndex,
    Blur,
    FontFamily,
    FontWeight,
    TextCase,
    TextDecoration,
    Visibility,
    String,
    ProductCopy,
}
impl TokenType {
    pub const ALL: [TokenType; 25] = [
        TokenType::Color,
        TokenType::Border,
        TokenType::Gradient,
        TokenType::Shadow,
        TokenType::Typography,
        TokenType::Dimension,
        TokenType::Size,
        TokenType::Space,
        TokenType::Opacity,
        TokenType::FontSize,
        TokenType::LineHeight,
        TokenType::LetterSpacing,
        TokenType::ParagraphSpacing,
        TokenType::BorderWidth,
        TokenType::Radius,
        TokenType::Duration,
        TokenType::ZIndex,
        TokenType::Blur,
        TokenType::FontFamily,
        TokenType::FontWeight,
        TokenType::TextCase,
        TokenType::TextDecoration,
        TokenType::Visibility,
        TokenType::String,
        TokenType::ProductCopy,
    ];

    /// Prefix used for the leaf `type` field and the optional type segment.
    pub fn default_prefix(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Border => "border",
            TokenType::Gradient => "gradient",
            TokenType::Shadow => "shadow",
            TokenType::Typography => "typography",
            TokenType::Dimension => "dimension",
            TokenType::Size => "size",
            TokenType::Space => "space",
            TokenType::Opacity => "opacity",
            TokenType::FontSize => "font-size",
            TokenType::LineHeight => "line-height",
            TokenType::LetterSpacing => "letter-spacing",
            TokenType::ParagraphSpacing => "paragraph-spacing",
            TokenType::BorderWidth => "border-width",
            TokenType::Radius => "radius",
            TokenType::Duration => "duration",
            TokenType::ZIndex => "z-index",
            TokenType::Blur => "blur",
            TokenType::FontFamily => "font-family",
            TokenType::FontWeight => "font-weight",
            TokenType::TextCase => "text-case",
            TokenType::TextDecoration => "text-decoration",
            TokenType::Visibility => "visibility",
            TokenType::String => "string",
            TokenType::ProductCopy => "product-copy",
        }
    }
    /// Whether values of this type are color or dimension literals. Text,
    /// composite and keyword types are written as stored.
    pub fn has_literal_values(&self) -> bool {
        matches!(
            self,
            TokenType::Color
                | TokenType::Dimension
                | TokenType::Size
                | TokenType::Space
                | TokenType::Opacity
                | TokenType::FontSize
                | TokenType::LineHeight
                | TokenType::LetterSpacing
                | TokenType::ParagraphSpacing
                | TokenType::BorderWidth
                | TokenType::Radius
                | TokenType::Duration
                | TokenType::ZIndex
                | TokenType::Blur
        )
    }
    pub fn default_file_name(&self) -> String {
        format!("{}.json", self.default_prefix())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub token_path: Vec<String>,
    pub token_type: TokenType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub referenced_token_id: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub parent_group_id: Option<String>,
    #[serde(default)]
    pub is_themed: bool,
    pub value: SourceValue,
}
impl Token {
    /// The stored value read for this token's type.
    pub fn literal(&self) -> TokenValue {
        self.value.read(self.token_type)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGroup {
    pub id: String,
    pub name: String,
    /// Group names from the root down to this group's parent.
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub brand_id: Option<String>,
}
impl TokenGroup {
    pub fn full_path(&self) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(self.name.clone());
        path
    }
}

/// Fills in the path of tokens that only know their parent group.
pub fn hydrate_token_paths(tokens: &[Token], groups: &[TokenGroup]) -> Vec<Token> {
    tokens
        .iter()
        .map(|token| {
            let mut token = token.clone();
            if token.token_path.is_empty() {
                if let Some(group) = token
                    .parent_group_id
                    .as_deref()
                    .and_then(|id| groups.iter().find(|g| g.id == id))
                {
                    token.token_path = group.full_path();
                }
            }
            token
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(alias = "persistentId")]
    pub id: String,
    pub name: String,
}

pub fn find_collection<'a>(collections: &'a [Collection], token: &Token) -> Option<&'a Collection> {
    let id = token.collection_id.as_deref()?;
    collections.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOverride {
    pub token_id: String,
    pub value: SourceValue,
    #[serde(default)]
    pub referenced_token_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    #[serde(default)]
    pub id_in_version: Option<String>,
    pub name: String,
    #[serde(default)]
    pub overrides: Vec<TokenOverride>,
}
impl Theme {
    pub fn matches(&self, id: &str) -> bool {
        self.id == id || self.id_in_version.as_deref() == Some(id)
    }
    pub fn overrides_token(&self, token_id: &str) -> bool {
        self.overrides.iter().any(|o| o.token_id == token_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    #[serde(default)]
    pub id_in_version: Option<String>,
    pub name: String,
}
impl Brand {
    pub fn matches(&self, id: &str) -> bool {
        self.id == id || self.id_in_version.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_deserializes_from_snapshot_shape() {
        let token: Token = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "name": "small",
            "tokenPath": ["space", "gap"],
            "tokenType": "Space",
            "description": "Vertical space between elements",
            "referencedTokenId": "t0",
            "collectionId": "c1",
            "value": "4px"
        }))
        .unwrap();
        assert_eq!(token.token_type, TokenType::Space);
        assert_eq!(token.token_path, vec!["space", "gap"]);
        assert_eq!(token.referenced_token_id.as_deref(), Some("t0"));
        assert!(!token.is_themed);
    }

    #[test]
    fn hydrate_uses_parent_group_only_for_empty_paths() {
        let groups = vec![TokenGroup {
            id: "g1".to_string(),
            name: "surface".to_string(),
            path: vec!["colour".to_string()],
            brand_id: None,
        }];
        let tokens: Vec<Token> = serde_json::from_value(serde_json::json!([
            { "id": "a", "name": "a", "tokenType": "Color", "parentGroupId": "g1", "value": "#000" },
            { "id": "b", "name": "b", "tokenType": "Color", "parentGroupId": "g1",
              "tokenPath": ["kept"], "value": "#000" }
        ]))
        .unwrap();
        let hydrated = hydrate_token_paths(&tokens, &groups);
        assert_eq!(hydrated[0].token_path, vec!["colour", "surface"]);
        assert_eq!(hydrated[1].token_path, vec!["kept"]);
        assert!(tokens[0].token_path.is_empty());
    }

    #[test]
    fn default_prefixes_are_kebab_case() {
        assert_eq!(TokenType::FontSize.default_prefix(), "font-size");
        assert_eq!(TokenType::Color.default_file_name(), "color.json");
    }
}
