use serde_json::json;
use style_dictionary_core::{
    apply_themes, process_tokens, Document, NameRegistry, NamingOptions, ProcessOptions, Theme, Token, TokenLookup,
    TokenSortOrder, ValueLayout,
};

fn tokens(value: serde_json::Value) -> Vec<Token> {
    serde_json::from_value(value).unwrap()
}

fn flat(naming: &NamingOptions) -> ProcessOptions<'_> {
    ProcessOptions {
        naming,
        layout: ValueLayout::Flat,
        sort_order: TokenSortOrder::Default,
        generate_empty_files: false,
        show_descriptions: true,
        disclaimer: None,
    }
}

fn backdrop_value(_: &Token, _: &TokenLookup<'_>, _: &dyn Fn(&Token) -> String) -> String {
    "rgba(0,0,0,0.2)".to_string()
}

fn overlay_backdrop() -> Vec<Token> {
    tokens(json!([{
        "id": "3ed3cd4a-2966-49c7-a542-fc0ffce61dad",
        "name": "overlayBackdrop",
        "tokenPath": ["colour", "surface"],
        "tokenType": "Color",
        "description": "",
        "collectionId": "3aabc958-8bbd-42c5-9b55-bd1e45bb52cd",
        "value": "rgba(0, 0, 0, 0.2)"
    }]))
}

#[test]
fn single_color_token_round_trip() {
    let tokens = overlay_backdrop();
    let naming = NamingOptions::default();
    let document = process_tokens(&tokens, &tokens, &[], &backdrop_value, &flat(&naming), &mut NameRegistry::new())
        .unwrap()
        .unwrap();
    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({ "colour": { "surface": { "overlayBackdrop": { "value": "rgba(0,0,0,0.2)", "type": "color" } } } })
    );
}

#[test]
fn no_tokens_means_no_document() {
    let naming = NamingOptions::default();
    let result = process_tokens(&[], &overlay_backdrop(), &[], &backdrop_value, &flat(&naming), &mut NameRegistry::new());
    assert_eq!(result.unwrap(), None);
}

#[test]
fn nested_theme_passes_merge_without_loss() {
    let base = overlay_backdrop();
    let themes: Vec<Theme> = serde_json::from_value(json!([
        { "id": "a", "name": "A", "overrides": [{ "tokenId": base[0].id, "value": "#000000" }] },
        { "id": "b", "name": "B", "overrides": [{ "tokenId": base[0].id, "value": "#ffffff" }] }
    ]))
    .unwrap();
    fn hex(token: &Token, _: &TokenLookup<'_>, _: &dyn Fn(&Token) -> String) -> String {
        match token.literal() {
            style_dictionary_core::TokenValue::Color(color) if color.r == 0.0 => "x".to_string(),
            _ => "y".to_string(),
        }
    }

    let naming = NamingOptions::default();
    let mut registry = NameRegistry::new();
    let mut merged = Document::default();
    for theme in &themes {
        let themed = apply_themes(&base, &base, &[theme]);
        let options = ProcessOptions {
            layout: ValueLayout::Themed(theme.name.clone()),
            ..flat(&naming)
        };
        let document = process_tokens(&themed, &themed, &[], &hex, &options, &mut registry)
            .unwrap()
            .unwrap();
        merged = merged.merge(&document).unwrap();
    }

    assert_eq!(
        serde_json::to_value(&merged).unwrap(),
        json!({ "colour": { "surface": { "overlayBackdrop": {
            "A": { "value": "x", "type": "color" },
            "B": { "value": "y", "type": "color" }
        } } } })
    );
}

#[test]
fn merge_order_only_matters_for_conflicting_fields() {
    let base = overlay_backdrop();
    let naming = NamingOptions::default();
    let run = |theme: &str| {
        let options = ProcessOptions {
            layout: ValueLayout::Themed(theme.to_string()),
            ..flat(&naming)
        };
        process_tokens(&base, &base, &[], &backdrop_value, &options, &mut NameRegistry::new())
            .unwrap()
            .unwrap()
    };
    let (light, dark) = (run("light"), run("dark"));
    let forward = serde_json::to_value(light.merge(&dark).unwrap()).unwrap();
    let backward = serde_json::to_value(dark.merge(&light).unwrap()).unwrap();
    let leaf_keys = |doc: &serde_json::Value| {
        let mut keys: Vec<String> = doc["colour"]["surface"]["overlayBackdrop"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    };
    assert_eq!(leaf_keys(&forward), leaf_keys(&backward));
}

#[test]
fn colliding_keys_restart_in_every_run() {
    let tokens = tokens(json!([
        { "id": "1", "name": "gap", "tokenPath": ["space"], "tokenType": "Space", "value": "4px" },
        { "id": "2", "name": "Gap", "tokenPath": ["space"], "tokenType": "Space", "value": "8px" },
        { "id": "3", "name": "GAP", "tokenPath": ["space"], "tokenType": "Space", "value": "12px" }
    ]));
    fn measure(token: &Token, _: &TokenLookup<'_>, _: &dyn Fn(&Token) -> String) -> String {
        token.id.clone()
    }
    let naming = NamingOptions::default();
    let mut registry = NameRegistry::new();
    for _ in 0..2 {
        let document = process_tokens(&tokens, &tokens, &[], &measure, &flat(&naming), &mut registry)
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({ "space": {
                "gap": { "value": "1", "type": "space" },
                "gap-2": { "value": "2", "type": "space" },
                "gap-3": { "value": "3", "type": "space" }
            } })
        );
    }
}
