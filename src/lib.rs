//! Style Dictionary exporter: reads a design system snapshot and writes one
//! JSON style file per token type, with themes applied according to the
//! configured [`ThemeExportStyle`].

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod source;

pub use config::{ColorFormat, ConfigError, ExporterConfiguration, ThemeExportStyle};
pub use error::ExporterError;
pub use export::{export, write_files, ExportContext, OutputFile};
pub use format::CssValueFormatter;
pub use source::{DesignSystemSource, Snapshot};
