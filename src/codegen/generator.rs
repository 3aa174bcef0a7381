//! Runs the emitters for every context and writes the results.

use std::path::{Path, PathBuf};

use crate::codegen::config::{Context, GeneratorConfiguration};
use crate::codegen::diesel::{self, ModulePaths};
use crate::codegen::fs_utils;
use crate::codegen::types::{resolve_tables, TableDef};

/// Decides what happens when a target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellCallback {
    pub overwrite: bool,
}

impl ShellCallback {
    pub fn new(overwrite: bool) -> Self {
        ShellCallback { overwrite }
    }

    /// Path the file should actually be written to.
    fn target_for(&self, path: &Path, warnings: &mut Vec<String>) -> PathBuf {
        if self.overwrite || !path.exists() {
            return path.to_path_buf();
        }
        let unique = fs_utils::unique_path(path);
        warnings.push(format!(
            "Existing file {} was not overwritten, generated code written to {}",
            path.display(),
            unique.display()
        ));
        unique
    }
}

/// One rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub files: Vec<PathBuf>,
    pub warning_count: usize,
}

/// Generates schema, model, example and mapper sources from a parsed configuration.
///
/// Target paths in the configuration are resolved against `base_dir`
/// (the current directory unless set).
pub struct Generator<'w> {
    config: GeneratorConfiguration,
    callback: ShellCallback,
    warnings: &'w mut Vec<String>,
    base_dir: PathBuf,
}

impl<'w> Generator<'w> {
    pub fn new(
        config: GeneratorConfiguration,
        callback: ShellCallback,
        warnings: &'w mut Vec<String>,
    ) -> Self {
        Generator {
            config,
            callback,
            warnings,
            base_dir: PathBuf::from("."),
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }

    /// Render every artifact without touching the filesystem.
    pub fn render(&mut self) -> Result<Vec<GeneratedFile>, String> {
        let mut files = Vec::new();
        for context in &self.config.contexts {
            let tables = resolve_tables(context, self.warnings);
            if tables.is_empty() {
                self.warnings
                    .push(format!("Context {} has no tables to generate", context.id));
                continue;
            }
            render_context(context, &tables, &self.base_dir, &mut files)
                .map_err(|e| format!("Context {}: failed to render sources: {}", context.id, e))?;
        }
        Ok(files)
    }

    /// Render and write every artifact.
    pub fn generate(&mut self) -> Result<GenerationReport, String> {
        let warnings_before = self.warnings.len();
        tracing::info!(contexts = self.config.contexts.len(), "Starting code generation");

        let files = self.render()?;
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let target = self.callback.target_for(&file.path, self.warnings);
            fs_utils::write_file(&target, &file.contents)
                .map_err(|e| format!("Failed to write {}: {}", target.display(), e))?;
            tracing::debug!(path = %target.display(), "Wrote generated file");
            written.push(target);
        }

        let warning_count = self.warnings.len() - warnings_before;
        tracing::info!(
            files = written.len(),
            "Code generation completed with {} warnings",
            warning_count
        );
        for warning in &self.warnings[warnings_before..] {
            tracing::warn!("Warning: {}", warning);
        }

        Ok(GenerationReport {
            files: written,
            warning_count,
        })
    }
}

fn render_context(
    context: &Context,
    tables: &[TableDef],
    base_dir: &Path,
    files: &mut Vec<GeneratedFile>,
) -> Result<(), std::fmt::Error> {
    let paths = ModulePaths::from_context(context);

    // The parser guarantees these targets are present.
    let schema_file = context
        .schema_generator
        .as_ref()
        .map(|g| g.target_file.as_str())
        .unwrap_or("src/schema.rs");
    let model_dir = context
        .model_generator
        .as_ref()
        .map(|g| g.target_project.as_str())
        .unwrap_or("src/model");
    let example_dir = context.example_target().unwrap_or(model_dir);
    let mapper_dir = context
        .mapper_generator
        .as_ref()
        .map(|g| g.target_project.as_str())
        .unwrap_or("src/mapper");

    files.push(GeneratedFile {
        path: base_dir.join(schema_file),
        contents: diesel::generate_schema(tables)?,
    });

    for table in tables {
        let module = table.module_name();
        files.push(GeneratedFile {
            path: base_dir.join(model_dir).join(format!("{}.rs", module)),
            contents: diesel::generate_model(table, &paths)?,
        });
        files.push(GeneratedFile {
            path: base_dir.join(example_dir).join(format!("{}_example.rs", module)),
            contents: diesel::generate_example(table, &paths)?,
        });
        files.push(GeneratedFile {
            path: base_dir.join(mapper_dir).join(format!("{}_mapper.rs", module)),
            contents: diesel::generate_mapper(table, &paths)?,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::config::ConfigurationParser;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
        <generatorConfiguration>
            <context id="shop" runtimePath="crate::runtime">
                <schemaGenerator targetFile="out/schema.rs"/>
                <modelGenerator targetProject="out/model"/>
                <mapperGenerator targetProject="out/mapper"/>
                <table tableName="t_order" domainObjectName="Order">
                    <generatedKey column="id"/>
                    <column name="id" type="BIGINT" nullable="false"/>
                    <column name="total" type="BIGINT" nullable="false"/>
                    <columnOverride column="total" typeHandler="money"/>
                </table>
            </context>
        </generatorConfiguration>
    "#;

    fn parse(warnings: &mut Vec<String>) -> GeneratorConfiguration {
        ConfigurationParser::new(warnings)
            .parse_configuration(CONFIG)
            .unwrap()
    }

    #[test]
    fn test_render_plans_four_files() {
        let mut warnings = Vec::new();
        let config = parse(&mut warnings);
        let files = Generator::new(config, ShellCallback::new(true), &mut warnings)
            .with_base_dir("/base")
            .render()
            .unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/base/out/schema.rs"),
                PathBuf::from("/base/out/model/order.rs"),
                PathBuf::from("/base/out/model/order_example.rs"),
                PathBuf::from("/base/out/mapper/order_mapper.rs"),
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_generate_respects_overwrite_flag() {
        let dir = TempDir::new().unwrap();
        let schema = dir.path().join("out/schema.rs");
        fs_utils::write_file(&schema, "// hand written").unwrap();

        let mut warnings = Vec::new();
        let config = parse(&mut warnings);
        let report = Generator::new(config, ShellCallback::new(false), &mut warnings)
            .with_base_dir(dir.path())
            .generate()
            .unwrap();

        assert_eq!(std::fs::read_to_string(&schema).unwrap(), "// hand written");
        assert!(report.files.contains(&dir.path().join("out/schema.rs.1")));
        assert_eq!(report.warning_count, 1);
        assert!(warnings[0].contains("was not overwritten"));

        let mut warnings = Vec::new();
        let config = parse(&mut warnings);
        let report = Generator::new(config, ShellCallback::new(true), &mut warnings)
            .with_base_dir(dir.path())
            .generate()
            .unwrap();

        assert_eq!(report.warning_count, 0);
        assert!(std::fs::read_to_string(&schema).unwrap().contains("diesel::table!"));
    }

    #[test]
    fn test_context_without_tables_warns() {
        let xml = CONFIG.replace(r#"<generatedKey column="id"/>"#, "");
        let mut warnings = Vec::new();
        let config = ConfigurationParser::new(&mut warnings)
            .parse_configuration(&xml)
            .unwrap();
        let files = Generator::new(config, ShellCallback::new(true), &mut warnings)
            .render()
            .unwrap();

        assert!(files.is_empty());
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("no primary key"));
        assert!(warnings[1].contains("no tables to generate"));
    }
}
