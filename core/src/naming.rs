use convert_case::{Case, Casing};
use itertools::Itertools;
use serde::Deserialize;

use crate::model::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringCase {
    #[default]
    CamelCase,
    KebabCase,
    SnakeCase,
    PascalCase,
    ConstantCase,
    FlatCase,
}
impl StringCase {
    fn case(&self) -> Case {
        match self {
            StringCase::CamelCase => Case::Camel,
            StringCase::KebabCase => Case::Kebab,
            StringCase::SnakeCase => Case::Snake,
            StringCase::PascalCase => Case::Pascal,
            StringCase::ConstantCase => Case::UpperSnake,
            StringCase::FlatCase => Case::Flat,
        }
    }
}

/// Identifier-safe rendition of a group, token or theme name. Returns an
/// empty string when nothing usable is left.
pub fn code_safe_name(raw: &str, style: StringCase) -> String {
    let words = deunicode::deunicode(raw)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>();
    let words = words.split_whitespace().join(" ");
    if words.is_empty() {
        return String::new();
    }
    let name = words.to_case(style.case());
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

pub fn theme_identifier(theme: &Theme, style: StringCase) -> String {
    code_safe_name(&theme.name, style)
}
