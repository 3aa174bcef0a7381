//! Code generation framework for table mappers.
//!
//! This module turns an XML generator configuration into Diesel schema, model,
//! example (criteria) and mapper sources.

pub mod config;
pub mod types;
pub mod utils;
pub mod fs_utils;
pub mod diesel;
pub mod generator;

// Re-export key types
pub use config::{ConfigurationParser, Context, GeneratorConfiguration, TableConfig};
pub use types::{ColumnDef, SqlType, TableDef, TypeHandler};
pub use generator::{GeneratedFile, GenerationReport, Generator, ShellCallback};

use std::path::Path;

/// Generate all code from a generator configuration file
///
/// Target paths in the configuration are resolved against `base_dir`. Warnings are
/// appended to `warnings` and also logged.
///
/// # Example
///
/// ```rust,no_run
/// let mut warnings = Vec::new();
/// mapgen::codegen::generate_from_xml("resources/generatorConfig.xml", ".", true, &mut warnings)
///     .expect("Code generation failed");
/// ```
pub fn generate_from_xml(
    config_path: impl AsRef<Path>,
    base_dir: impl AsRef<Path>,
    overwrite: bool,
    warnings: &mut Vec<String>,
) -> Result<GenerationReport, String> {
    let config = ConfigurationParser::new(warnings).parse_file(config_path)?;
    Generator::new(config, ShellCallback::new(overwrite), warnings)
        .with_base_dir(base_dir)
        .generate()
}

/// Parse and resolve a configuration without writing anything.
///
/// Returns the number of tables that would be generated.
pub fn validate_xml(config_path: impl AsRef<Path>, warnings: &mut Vec<String>) -> Result<usize, String> {
    let config = ConfigurationParser::new(warnings).parse_file(config_path)?;
    let count = config
        .contexts
        .iter()
        .map(|context| types::resolve_tables(context, warnings).len())
        .sum();
    Ok(count)
}

/// Connection URL of the first context that declares `<connection url>`.
pub fn connection_url(config_path: impl AsRef<Path>, warnings: &mut Vec<String>) -> Result<Option<String>, String> {
    let config = ConfigurationParser::new(warnings).parse_file(config_path)?;
    Ok(config
        .contexts
        .iter()
        .find_map(|context| context.connection_url())
        .map(str::to_string))
}
