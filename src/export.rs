use std::path::{Path, PathBuf};

use itertools::Itertools;
use style_dictionary_core::{
    apply_themes, filter_themed_tokens, hydrate_token_paths, process_tokens, theme_identifier, Collection, Document,
    NameRegistry, NamingOptions, StringCase, Theme, Token, TokenType, ValueLayout,
};
use tracing::{debug, info};

use crate::config::{ExporterConfiguration, ThemeExportStyle};
use crate::error::ExporterError;
use crate::format::CssValueFormatter;
use crate::source::DesignSystemSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub relative_path: String,
    pub file_name: String,
    pub content: String,
}
impl OutputFile {
    pub fn path(&self) -> PathBuf {
        Path::new(&self.relative_path).join(&self.file_name)
    }
}

/// What to export: an optional brand and the themes to apply, by id or
/// version id. No theme ids means every theme.
#[derive(Debug, Clone, Default)]
pub struct ExportContext {
    pub brand_id: Option<String>,
    pub theme_ids: Vec<String>,
}

/// Generates every style file for `context`.
///
/// A brand or theme that cannot be found aborts the whole export.
pub fn export(
    source: &dyn DesignSystemSource,
    context: &ExportContext,
    config: &ExporterConfiguration,
) -> Result<Vec<OutputFile>, ExporterError> {
    config.validate()?;
    let mut tokens = source.tokens()?;
    let mut groups = source.token_groups()?;
    let collections = source.token_collections()?;

    if let Some(brand_id) = &context.brand_id {
        let brands = source.brands()?;
        let brand = brands
            .iter()
            .find(|brand| brand.matches(brand_id))
            .ok_or_else(|| ExporterError::BrandNotFound(brand_id.clone()))?;
        info!(brand = %brand.name, "Exporting brand");
        tokens.retain(|token| token.brand_id.as_deref() == Some(brand.id.as_str()));
        groups.retain(|group| group.brand_id.as_deref() == Some(brand.id.as_str()));
    }
    let tokens = hydrate_token_paths(&tokens, &groups);

    let themes = source.themes()?;
    let selected: Vec<&Theme> = if context.theme_ids.is_empty() {
        themes.iter().collect()
    } else {
        context
            .theme_ids
            .iter()
            .map(|id| {
                themes
                    .iter()
                    .find(|theme| theme.matches(id))
                    .ok_or_else(|| ExporterError::ThemeNotFound(id.clone()))
            })
            .collect::<Result<_, _>>()?
    };

    let mut exporter = Exporter::new(config, &collections);
    let files = match config.export_themes_as {
        ThemeExportStyle::ApplyDirectly => {
            let themed = apply_themes(&tokens, &tokens, &selected);
            exporter.file_set(&themed, None)?
        }
        ThemeExportStyle::SeparateFiles => {
            let mut files = exporter.base_files(&tokens)?;
            for theme in &selected {
                let themes = std::slice::from_ref(theme);
                let themed = apply_themes(&tokens, &tokens, themes);
                let directory = theme_identifier(theme, StringCase::CamelCase);
                files.extend(exporter.file_set(&themed, Some((directory.as_str(), themes)))?);
            }
            files
        }
        ThemeExportStyle::NestedThemes => exporter.nested_files(&tokens, &selected)?,
        ThemeExportStyle::MergedTheme => {
            let mut files = exporter.base_files(&tokens)?;
            if !selected.is_empty() {
                let themed = apply_themes(&tokens, &tokens, &selected);
                let directory = selected
                    .iter()
                    .map(|theme| theme_identifier(theme, StringCase::CamelCase))
                    .join("-");
                files.extend(exporter.file_set(&themed, Some((directory.as_str(), selected.as_slice())))?);
            }
            files
        }
    };
    info!(files = files.len(), "Export finished");
    Ok(files)
}

/// Writes `files` below `root`, creating directories as needed.
pub fn write_files(root: &Path, files: &[OutputFile]) -> Result<(), ExporterError> {
    for file in files {
        let path = root.join(file.path());
        let io_error = |source| ExporterError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(&path, &file.content).map_err(io_error)?;
        debug!(path = %path.display(), "Wrote style file");
    }
    Ok(())
}

struct Exporter<'a> {
    config: &'a ExporterConfiguration,
    collections: &'a [Collection],
    naming: NamingOptions,
    formatter: CssValueFormatter,
    registry: NameRegistry,
}
impl<'a> Exporter<'a> {
    fn new(config: &'a ExporterConfiguration, collections: &'a [Collection]) -> Self {
        Self {
            config,
            collections,
            naming: config.naming(),
            formatter: CssValueFormatter::new(config),
            registry: NameRegistry::new(),
        }
    }

    fn base_files(&mut self, tokens: &[Token]) -> Result<Vec<OutputFile>, ExporterError> {
        if self.config.export_base_values {
            self.file_set(tokens, None)
        } else {
            Ok(Vec::new())
        }
    }

    /// One file per token type. A themed set goes to its own directory and,
    /// with `exportOnlyThemedTokens`, only holds tokens its themes override.
    fn file_set(
        &mut self,
        tokens: &[Token],
        themed: Option<(&str, &[&Theme])>,
    ) -> Result<Vec<OutputFile>, ExporterError> {
        let mut files = Vec::new();
        for token_type in TokenType::ALL {
            let mut of_type = tokens_of_type(tokens, token_type);
            if let Some((directory, themes)) = themed {
                if self.config.export_only_themed_tokens {
                    of_type = match themes {
                        [theme] => filter_themed_tokens(&of_type, theme),
                        _ => of_type
                            .into_iter()
                            .filter(|token| themes.iter().any(|theme| theme.overrides_token(&token.id)))
                            .collect(),
                    };
                    if of_type.is_empty() {
                        debug!(?token_type, directory, "No themed tokens, skipping file");
                        continue;
                    }
                }
            }
            let directory = themed.map(|(directory, _)| directory);
            if let Some(document) = self.document(&of_type, tokens, ValueLayout::Flat)? {
                files.push(self.output_file(token_type, directory, &document)?);
            }
        }
        Ok(files)
    }

    /// One file per token type holding every theme's value side by side,
    /// plus the base value when `exportBaseValues` is set.
    fn nested_files(&mut self, tokens: &[Token], themes: &[&Theme]) -> Result<Vec<OutputFile>, ExporterError> {
        let themed: Vec<(String, Vec<Token>)> = themes
            .iter()
            .map(|theme| {
                (
                    theme_identifier(theme, StringCase::KebabCase),
                    apply_themes(tokens, tokens, std::slice::from_ref(theme)),
                )
            })
            .collect();

        let mut files = Vec::new();
        for token_type in TokenType::ALL {
            let mut merged: Option<Document> = None;
            if self.config.nested_themes_include_base_values {
                merged = self.document(&tokens_of_type(tokens, token_type), tokens, ValueLayout::Flat)?;
            }
            for (key, themed_tokens) in &themed {
                let of_type = tokens_of_type(themed_tokens, token_type);
                let layout = ValueLayout::Themed(key.clone());
                if let Some(document) = self.document(&of_type, themed_tokens, layout)? {
                    merged = Some(match merged {
                        Some(merged) => merged.merge(&document)?,
                        None => document,
                    });
                }
            }
            if let Some(document) = merged {
                files.push(self.output_file(token_type, None, &document)?);
            }
        }
        Ok(files)
    }

    fn document(
        &mut self,
        tokens: &[Token],
        all_tokens: &[Token],
        layout: ValueLayout,
    ) -> Result<Option<Document>, ExporterError> {
        let options = self.config.process_options(&self.naming, layout);
        Ok(process_tokens(
            tokens,
            all_tokens,
            self.collections,
            &self.formatter,
            &options,
            &mut self.registry,
        )?)
    }

    fn output_file(
        &self,
        token_type: TokenType,
        directory: Option<&str>,
        document: &Document,
    ) -> Result<OutputFile, ExporterError> {
        let file = OutputFile {
            relative_path: directory
                .map(|directory| format!("./{directory}"))
                .unwrap_or_else(|| self.config.base_style_file_path.clone()),
            file_name: self.config.style_file_name(token_type),
            content: document.to_json(self.config.indent)?,
        };
        info!(path = %file.path().display(), "Generated style file");
        Ok(file)
    }
}

fn tokens_of_type(tokens: &[Token], token_type: TokenType) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| token.token_type == token_type)
        .cloned()
        .collect()
}
