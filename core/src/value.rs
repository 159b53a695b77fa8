use std::fmt;

use csscolorparser::Color;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};

use crate::model::TokenType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Pixels,
    Rem,
    Em,
    Percent,
    Milliseconds,
    Raw,
}
impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Pixels => "px",
            Unit::Rem => "rem",
            Unit::Em => "em",
            Unit::Percent => "%",
            Unit::Milliseconds => "ms",
            Unit::Raw => "",
        }
    }
}

/// A token's own literal value, as stored in the design system.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Color(Color),
    Dimension { measure: f64, unit: Unit },
    Raw(String),
}
impl TokenValue {
    pub fn parse(input: &str) -> Result<TokenValue, String> {
        value_parser::value(input).map_err(|err| format!("Invalid token value {input:?}: {err}"))
    }
}

peg::parser! {
  grammar value_parser() for str {
    rule _ = quiet!{[' ' | '\n' | '\t']*}

    rule number() -> f64
        = n:$("-"? (['0'..='9']+ ("." ['0'..='9']*)? / "." ['0'..='9']+)) {? n.parse().or(Err("number")) }

    rule unit() -> Unit
        = "px" { Unit::Pixels }
        / "rem" { Unit::Rem }
        / "em" { Unit::Em }
        / "%" { Unit::Percent }
        / "ms" { Unit::Milliseconds }

    rule dimension() -> TokenValue
        = measure:number() unit:unit()? { TokenValue::Dimension { measure, unit: unit.unwrap_or(Unit::Raw) } }

    rule color() -> TokenValue
        = c:$("#" ['0'..='9' | 'a'..='f' | 'A'..='F']+) {? csscolorparser::parse(c).map(TokenValue::Color).or(Err("color")) }
        / c:$(("rgba" / "rgb" / "hsla" / "hsl") "(" (!")" [_])* ")") {? csscolorparser::parse(c).map(TokenValue::Color).or(Err("color")) }

    pub(crate) rule value() -> TokenValue
        = _ v:dimension() _ ![_] { v }
        / _ v:color() _ ![_] { v }
        / v:$([_]*) { TokenValue::Raw(v.to_string()) }
  }
}

#[test]
fn test() {
    assert_eq!(
        value_parser::value("4px").unwrap(),
        TokenValue::Dimension {
            measure: 4.0,
            unit: Unit::Pixels
        }
    );
    assert_eq!(
        value_parser::value("-0.5rem").unwrap(),
        TokenValue::Dimension {
            measure: -0.5,
            unit: Unit::Rem
        }
    );
    assert_eq!(
        value_parser::value("232.8300018310547").unwrap(),
        TokenValue::Dimension {
            measure: 232.8300018310547,
            unit: Unit::Raw
        }
    );
    assert_eq!(
        value_parser::value("90%").unwrap(),
        TokenValue::Dimension {
            measure: 90.0,
            unit: Unit::Percent
        }
    );
    assert_eq!(
        value_parser::value("#ff00ff").unwrap(),
        TokenValue::Color(csscolorparser::parse("#ff00ff").unwrap())
    );
    assert_eq!(
        value_parser::value("rgba(0, 0, 0, 0.2)").unwrap(),
        TokenValue::Color(csscolorparser::parse("rgba(0, 0, 0, 0.2)").unwrap())
    );
    assert_eq!(
        value_parser::value("ABC Diatype Variable").unwrap(),
        TokenValue::Raw("ABC Diatype Variable".to_string())
    );
    assert_eq!(
        value_parser::value("4px solid").unwrap(),
        TokenValue::Raw("4px solid".to_string())
    );
    assert_eq!(
        value_parser::value("  hello  ").unwrap(),
        TokenValue::Raw("  hello  ".to_string())
    );
}

/// A value exactly as the design system stores it.
///
/// Only read as a color or dimension for token types whose values are
/// literals of that kind; every other type keeps the stored text.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Text(String),
    Number(f64),
}
impl SourceValue {
    pub fn read(&self, token_type: TokenType) -> TokenValue {
        match self {
            SourceValue::Text(text) if token_type.has_literal_values() => {
                TokenValue::parse(text).unwrap_or_else(|_| TokenValue::Raw(text.clone()))
            }
            SourceValue::Text(text) => TokenValue::Raw(text.clone()),
            SourceValue::Number(measure) if token_type.has_literal_values() => TokenValue::Dimension {
                measure: *measure,
                unit: Unit::Raw,
            },
            SourceValue::Number(number) => TokenValue::Raw(number.to_string()),
        }
    }
}
impl From<&str> for SourceValue {
    fn from(text: &str) -> Self {
        SourceValue::Text(text.to_string())
    }
}

#[test]
fn text_types_keep_stored_text() {
    let copy = SourceValue::from("007");
    assert_eq!(copy.read(TokenType::ProductCopy), TokenValue::Raw("007".to_string()));
    assert_eq!(
        copy.read(TokenType::Space),
        TokenValue::Dimension {
            measure: 7.0,
            unit: Unit::Raw
        }
    );
    assert_eq!(
        SourceValue::from("  hello  ").read(TokenType::String),
        TokenValue::Raw("  hello  ".to_string())
    );
    assert_eq!(
        SourceValue::from("#fff").read(TokenType::FontFamily),
        TokenValue::Raw("#fff".to_string())
    );
    assert_eq!(SourceValue::Number(400.0).read(TokenType::FontWeight), TokenValue::Raw("400".to_string()));
}

struct SourceValueVisitor;

impl<'de> Visitor<'de> for SourceValueVisitor {
    type Value = SourceValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a token value string or a number")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SourceValue::Text(value.to_string()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SourceValue::Number(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_f64(value as f64)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_f64(value as f64)
    }
}

impl<'de> Deserialize<'de> for SourceValue {
    fn deserialize<D>(deserializer: D) -> Result<SourceValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SourceValueVisitor)
    }
}
