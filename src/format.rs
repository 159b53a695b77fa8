use csscolorparser::Color;
use style_dictionary_core::{Token, TokenLookup, TokenValue, Unit, ValueFormatter};
use tracing::warn;

use crate::config::{ColorFormat, ExporterConfiguration};

/// Renders token values the way CSS expects them.
#[derive(Debug, Clone)]
pub struct CssValueFormatter {
    pub use_references: bool,
    pub color_format: ColorFormat,
    pub decimals: u32,
    pub force_rem_unit: bool,
    pub rem_base: f64,
}
impl CssValueFormatter {
    pub fn new(config: &ExporterConfiguration) -> Self {
        Self {
            use_references: config.use_references,
            color_format: config.color_format,
            decimals: config.color_precision,
            force_rem_unit: config.force_rem_unit,
            rem_base: config.rem_base,
        }
    }

    pub fn literal(&self, value: &TokenValue) -> String {
        match value {
            TokenValue::Color(color) => self.color(color),
            TokenValue::Dimension { measure, unit } => self.dimension(*measure, *unit),
            TokenValue::Raw(raw) => raw.clone(),
        }
    }

    fn color(&self, color: &Color) -> String {
        match self.color_format {
            ColorFormat::SmartHex if color.a >= 1.0 => color.to_hex_string(),
            ColorFormat::SmartHex | ColorFormat::Rgba => {
                let [r, g, b, _] = color.to_rgba8();
                format!("rgba({r},{g},{b},{})", self.number(color.a))
            }
            ColorFormat::Hex8 => {
                let [r, g, b, a] = color.to_rgba8();
                format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
            }
            ColorFormat::Hsla => {
                let (h, s, l, a) = color.to_hsla();
                let h = if h.is_nan() { 0.0 } else { h };
                format!(
                    "hsla({},{}%,{}%,{})",
                    self.number(h),
                    self.number(s * 100.0),
                    self.number(l * 100.0),
                    self.number(a)
                )
            }
        }
    }

    fn dimension(&self, measure: f64, unit: Unit) -> String {
        if self.force_rem_unit && unit == Unit::Pixels {
            return format!("{}rem", self.number(measure / self.rem_base));
        }
        format!("{}{}", self.number(measure), unit.suffix())
    }

    fn number(&self, value: f64) -> String {
        let factor = 10f64.powi(self.decimals as i32);
        // `+ 0.0` turns -0 into 0.
        format!("{}", (value * factor).round() / factor + 0.0)
    }
}
impl ValueFormatter for CssValueFormatter {
    fn format(&self, token: &Token, lookup: &TokenLookup<'_>, reference: &dyn Fn(&Token) -> String) -> String {
        if self.use_references {
            if let Some(id) = token.referenced_token_id.as_deref() {
                match lookup.get(id) {
                    Some(target) => return reference(target),
                    None => warn!(token = %token.id, reference = id, "Referenced token not found, using its value"),
                }
            }
        }
        self.literal(&token.literal())
    }
}
