use indexmap::IndexMap;
use serde::Deserialize;
use style_dictionary_core::{
    NamingOptions, ProcessOptions, StringCase, TokenNameStructure, TokenSortOrder, TokenType, ValueLayout,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("remBase must be a positive number, got {0}")]
    InvalidRemBase(f64),

    #[error("indent must be at most 10 spaces, got {0}")]
    IndentTooWide(usize),

    #[error("colorPrecision must be at most 10 decimals, got {0}")]
    PrecisionTooHigh(u32),

    #[error("Custom style file name for {0:?} is empty")]
    EmptyFileName(TokenType),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeExportStyle {
    ApplyDirectly,
    #[default]
    SeparateFiles,
    NestedThemes,
    MergedTheme,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorFormat {
    /// `#rrggbb` when opaque, `rgba(...)` otherwise.
    #[default]
    SmartHex,
    Hex8,
    Rgba,
    Hsla,
}

pub const DEFAULT_DISCLAIMER: &str =
    "This file was generated automatically. Do not edit it manually, your changes will be lost.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExporterConfiguration {
    pub export_themes_as: ThemeExportStyle,
    pub export_base_values: bool,
    /// Nested theme output only: put base values inline next to the theme
    /// keys. `export_base_values` does not apply to nested themes.
    pub nested_themes_include_base_values: bool,
    pub export_only_themed_tokens: bool,
    pub token_sort_order: TokenSortOrder,
    pub generate_empty_files: bool,
    pub indent: usize,
    pub show_generated_file_disclaimer: bool,
    pub disclaimer: String,
    pub show_descriptions: bool,
    pub token_name_structure: TokenNameStructure,
    pub global_name_prefix: String,
    pub use_token_type_prefixes: bool,
    pub token_prefixes: IndexMap<TokenType, String>,
    pub token_name_style: StringCase,
    pub use_references: bool,
    pub color_format: ColorFormat,
    pub color_precision: u32,
    pub force_rem_unit: bool,
    pub rem_base: f64,
    pub base_style_file_path: String,
    pub customize_style_file_names: bool,
    pub style_file_names: IndexMap<TokenType, String>,
}
impl Default for ExporterConfiguration {
    fn default() -> Self {
        Self {
            export_themes_as: ThemeExportStyle::default(),
            export_base_values: true,
            nested_themes_include_base_values: false,
            export_only_themed_tokens: false,
            token_sort_order: TokenSortOrder::default(),
            generate_empty_files: false,
            indent: 2,
            show_generated_file_disclaimer: true,
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
            show_descriptions: true,
            token_name_structure: TokenNameStructure::default(),
            global_name_prefix: String::new(),
            use_token_type_prefixes: false,
            token_prefixes: IndexMap::new(),
            token_name_style: StringCase::default(),
            use_references: true,
            color_format: ColorFormat::default(),
            color_precision: 3,
            force_rem_unit: false,
            rem_base: 16.0,
            base_style_file_path: "./base".to_string(),
            customize_style_file_names: false,
            style_file_names: IndexMap::new(),
        }
    }
}
impl ExporterConfiguration {
    /// Parses and validates a JSON configuration. Missing keys keep defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfiguration = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rem_base.is_nan() || self.rem_base <= 0.0 {
            return Err(ConfigError::InvalidRemBase(self.rem_base));
        }
        if self.indent > 10 {
            return Err(ConfigError::IndentTooWide(self.indent));
        }
        if self.color_precision > 10 {
            return Err(ConfigError::PrecisionTooHigh(self.color_precision));
        }
        if self.customize_style_file_names {
            if let Some((token_type, _)) = self.style_file_names.iter().find(|(_, name)| name.trim().is_empty()) {
                return Err(ConfigError::EmptyFileName(*token_type));
            }
        }
        Ok(())
    }

    pub fn naming(&self) -> NamingOptions {
        NamingOptions {
            structure: self.token_name_structure,
            global_prefix: Some(self.global_name_prefix.trim())
                .filter(|p| !p.is_empty())
                .map(String::from),
            use_type_prefixes: self.use_token_type_prefixes,
            type_prefixes: self.token_prefixes.clone(),
            style: self.token_name_style,
        }
    }

    pub fn process_options<'a>(&'a self, naming: &'a NamingOptions, layout: ValueLayout) -> ProcessOptions<'a> {
        ProcessOptions {
            naming,
            layout,
            sort_order: self.token_sort_order,
            generate_empty_files: self.generate_empty_files,
            show_descriptions: self.show_descriptions,
            disclaimer: self
                .show_generated_file_disclaimer
                .then_some(self.disclaimer.as_str()),
        }
    }

    pub fn style_file_name(&self, token_type: TokenType) -> String {
        match self.style_file_names.get(&token_type) {
            Some(name) if self.customize_style_file_names => ensure_file_extension(name.trim(), ".json"),
            _ => token_type.default_file_name(),
        }
    }
}

fn ensure_file_extension(name: &str, extension: &str) -> String {
    if name.ends_with(extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}
