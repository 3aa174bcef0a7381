//! XML generator configuration.
//!
//! ```xml
//! <generatorConfiguration>
//!     <context id="coffee" runtimePath="crate::runtime">
//!         <schemaGenerator targetFile="src/schema.rs" modulePath="crate::schema"/>
//!         <modelGenerator targetProject="src/model" modulePath="crate::model"/>
//!         <mapperGenerator targetProject="src/mapper"/>
//!         <table tableName="t_coffee" domainObjectName="Coffee">
//!             <generatedKey column="id" identity="true"/>
//!             <column name="id" type="BIGINT" nullable="false" primaryKey="true"/>
//!             <column name="name" type="VARCHAR" length="255"/>
//!         </table>
//!     </context>
//! </generatorConfiguration>
//! ```

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::codegen::types::{column_ident, field_name, SqlType};

fn default_runtime_path() -> String {
    "mapgen::runtime".to_string()
}

fn default_true() -> bool {
    true
}

/// Root of a generator configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfiguration {
    #[serde(rename = "context", default)]
    pub contexts: Vec<Context>,
}

/// One generation unit: a set of tables and where their artifacts go.
#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "@id", default)]
    pub id: String,
    /// Module path generated code uses to reach the mapper runtime.
    #[serde(rename = "@runtimePath", default = "default_runtime_path")]
    pub runtime_path: String,
    #[serde(default)]
    pub connection: Option<ConnectionConfig>,
    #[serde(rename = "schemaGenerator", default)]
    pub schema_generator: Option<SchemaGeneratorConfig>,
    #[serde(rename = "modelGenerator", default)]
    pub model_generator: Option<TargetConfig>,
    #[serde(rename = "exampleGenerator", default)]
    pub example_generator: Option<TargetConfig>,
    #[serde(rename = "mapperGenerator", default)]
    pub mapper_generator: Option<TargetConfig>,
    #[serde(rename = "table", default)]
    pub tables: Vec<TableConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(rename = "@url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaGeneratorConfig {
    #[serde(rename = "@targetFile", default)]
    pub target_file: String,
    #[serde(rename = "@modulePath", default)]
    pub module_path: Option<String>,
}

/// Output directory and module path for one artifact kind.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    #[serde(rename = "@targetProject", default)]
    pub target_project: String,
    #[serde(rename = "@modulePath", default)]
    pub module_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(rename = "@tableName", default)]
    pub table_name: String,
    #[serde(rename = "@domainObjectName", default)]
    pub domain_object_name: Option<String>,
    #[serde(rename = "domainObjectRenamingRule", default)]
    pub renaming_rule: Option<RenamingRule>,
    #[serde(rename = "generatedKey", default)]
    pub generated_key: Option<GeneratedKeyConfig>,
    #[serde(rename = "column", default)]
    pub columns: Vec<ColumnConfig>,
    #[serde(rename = "columnOverride", default)]
    pub column_overrides: Vec<ColumnOverride>,
    #[serde(rename = "ignoreColumn", default)]
    pub ignored_columns: Vec<IgnoreColumn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenamingRule {
    #[serde(rename = "@searchString")]
    pub search_string: String,
    #[serde(rename = "@replaceString", default)]
    pub replace_string: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedKeyConfig {
    #[serde(rename = "@column")]
    pub column: String,
    #[serde(rename = "@identity", default = "default_true")]
    pub identity: bool,
}

/// A column of the table schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@type", default)]
    pub column_type: String,
    #[serde(rename = "@length", default)]
    pub length: Option<u32>,
    #[serde(rename = "@nullable", default = "default_true")]
    pub nullable: bool,
    #[serde(rename = "@primaryKey", default)]
    pub primary_key: bool,
    #[serde(rename = "@remarks", default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnOverride {
    #[serde(rename = "@column")]
    pub column: String,
    /// Field name on the generated model.
    #[serde(rename = "@property", default)]
    pub property: Option<String>,
    #[serde(rename = "@typeHandler", default)]
    pub type_handler: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IgnoreColumn {
    #[serde(rename = "@column")]
    pub column: String,
}

impl Context {
    pub fn connection_url(&self) -> Option<&str> {
        self.connection
            .as_ref()
            .map(|c| c.url.trim())
            .filter(|url| !url.is_empty())
    }

    /// Module path of the generated schema, defaulting to `crate::schema`.
    pub fn schema_module(&self) -> String {
        self.schema_generator
            .as_ref()
            .and_then(|g| g.module_path.clone())
            .unwrap_or_else(|| "crate::schema".to_string())
    }

    pub fn model_module(&self) -> String {
        self.model_generator
            .as_ref()
            .and_then(|g| g.module_path.clone())
            .unwrap_or_else(|| "crate::model".to_string())
    }

    /// Example types live next to the models unless told otherwise.
    pub fn example_module(&self) -> String {
        self.example_generator
            .as_ref()
            .and_then(|g| g.module_path.clone())
            .unwrap_or_else(|| self.model_module())
    }

    pub fn example_target(&self) -> Option<&str> {
        self.example_generator
            .as_ref()
            .or(self.model_generator.as_ref())
            .map(|g| g.target_project.as_str())
    }
}

impl TableConfig {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn is_ignored(&self, column: &str) -> bool {
        self.ignored_columns
            .iter()
            .any(|i| i.column.eq_ignore_ascii_case(column))
    }
}

/// Whether `name` is usable as a SQL and Rust identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"))
        .is_match(name)
}

fn is_valid_module_path(path: &str) -> bool {
    path.split("::").all(is_valid_identifier)
}

/// Parses configuration XML, recording non-fatal problems as warnings.
pub struct ConfigurationParser<'w> {
    warnings: &'w mut Vec<String>,
}

impl<'w> ConfigurationParser<'w> {
    pub fn new(warnings: &'w mut Vec<String>) -> Self {
        ConfigurationParser { warnings }
    }

    /// Load and parse a configuration file.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<GeneratorConfiguration, String> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        self.parse_configuration(&xml)
            .map_err(|e| format!("{}: {}", path.display(), e))
    }

    pub fn parse_configuration(&mut self, xml: &str) -> Result<GeneratorConfiguration, String> {
        let mut config: GeneratorConfiguration = quick_xml::de::from_str(xml)
            .map_err(|e| format!("Invalid generator configuration: {}", e))?;

        if config.contexts.is_empty() {
            return Err("Configuration declares no <context>".to_string());
        }

        for context in &mut config.contexts {
            self.validate_context(context)?;
        }

        Ok(config)
    }

    fn validate_context(&mut self, context: &mut Context) -> Result<(), String> {
        if context.id.trim().is_empty() {
            return Err("<context> requires an id".to_string());
        }
        let id = context.id.clone();

        if !is_valid_module_path(&context.runtime_path) {
            return Err(format!("Context {}: invalid runtimePath '{}'", id, context.runtime_path));
        }

        match &context.schema_generator {
            Some(g) if !g.target_file.trim().is_empty() => {}
            Some(_) => return Err(format!("Context {}: <schemaGenerator> requires targetFile", id)),
            None => return Err(format!("Context {}: missing <schemaGenerator>", id)),
        }
        for (element, target) in [
            ("modelGenerator", &context.model_generator),
            ("mapperGenerator", &context.mapper_generator),
        ] {
            match target {
                Some(t) if !t.target_project.trim().is_empty() => {}
                Some(_) => {
                    return Err(format!("Context {}: <{}> requires targetProject", id, element))
                }
                None => return Err(format!("Context {}: missing <{}>", id, element)),
            }
        }
        if let Some(example) = &context.example_generator {
            if example.target_project.trim().is_empty() {
                return Err(format!("Context {}: <exampleGenerator> requires targetProject", id));
            }
        }
        for module in [
            context.schema_module(),
            context.model_module(),
            context.example_module(),
        ] {
            if !is_valid_module_path(&module) {
                return Err(format!("Context {}: invalid modulePath '{}'", id, module));
            }
        }

        let mut tables: IndexMap<String, TableConfig> = IndexMap::new();
        for table in std::mem::take(&mut context.tables) {
            if !is_valid_identifier(&table.table_name) {
                return Err(format!("Context {}: invalid table name '{}'", id, table.table_name));
            }
            let key = table.table_name.to_lowercase();
            if tables.contains_key(&key) {
                self.warn(format!(
                    "Table {} is configured more than once, later definition ignored",
                    table.table_name
                ));
                continue;
            }
            if let Some(table) = self.validate_table(table)? {
                tables.insert(key, table);
            }
        }
        context.tables = tables.into_values().collect();

        Ok(())
    }

    fn validate_table(&mut self, table: TableConfig) -> Result<Option<TableConfig>, String> {
        let name = table.table_name.clone();

        if table.columns.is_empty() {
            self.warn(format!("Table {} declares no columns, skipped", name));
            return Ok(None);
        }

        if let Some(domain) = &table.domain_object_name {
            if !is_valid_identifier(domain) {
                return Err(format!("Table {}: invalid domainObjectName '{}'", name, domain));
            }
        }
        if let Some(rule) = &table.renaming_rule {
            Regex::new(&rule.search_string).map_err(|e| {
                format!("Table {}: invalid domainObjectRenamingRule: {}", name, e)
            })?;
        }

        for column in &table.columns {
            if !is_valid_identifier(&column.name) {
                return Err(format!("Table {}: invalid column name '{}'", name, column.name));
            }
            if SqlType::parse(&column.column_type).is_none() {
                return Err(format!(
                    "Table {}: column {} has unsupported type '{}'",
                    name, column.name, column.column_type
                ));
            }
        }

        for column_override in &table.column_overrides {
            if !table.has_column(&column_override.column) {
                self.warn(format!(
                    "Column override for {}.{} names an unknown column",
                    name, column_override.column
                ));
            }
            if let Some(property) = &column_override.property {
                if !is_valid_identifier(property) {
                    return Err(format!(
                        "Table {}: invalid property '{}' for column {}",
                        name, property, column_override.column
                    ));
                }
            }
        }

        let mut names: IndexMap<String, String> = IndexMap::new();
        for column in &table.columns {
            if let Some(first) = names.insert(column.name.to_ascii_lowercase(), column.name.clone()) {
                return Err(format!(
                    "Table {}: column {} is declared more than once (first as {})",
                    name, column.name, first
                ));
            }
        }

        let mut idents: IndexMap<String, String> = IndexMap::new();
        let mut fields: IndexMap<String, String> = IndexMap::new();
        for column in table.columns.iter().filter(|c| !table.is_ignored(&c.name)) {
            let ident = column_ident(&column.name);
            if let Some(other) = idents.insert(ident.clone(), column.name.clone()) {
                return Err(format!(
                    "Table {}: columns {} and {} both map to '{}'",
                    name, other, column.name, ident
                ));
            }
            let property = table
                .column_overrides
                .iter()
                .find(|o| o.column.eq_ignore_ascii_case(&column.name))
                .and_then(|o| o.property.as_deref());
            let field = field_name(&column.name, property);
            if let Some(other) = fields.insert(field.clone(), column.name.clone()) {
                return Err(format!(
                    "Table {}: columns {} and {} both map to field '{}'",
                    name, other, column.name, field
                ));
            }
        }

        for ignored in &table.ignored_columns {
            if !table.has_column(&ignored.column) {
                self.warn(format!(
                    "Ignored column {}.{} does not exist",
                    name, ignored.column
                ));
            }
        }

        let mut table = table;
        if let Some(key) = &table.generated_key {
            if !table.has_column(&key.column) {
                self.warn(format!(
                    "Generated key {}.{} names an unknown column, ignored",
                    name, key.column
                ));
                table.generated_key = None;
            }
        }

        Ok(Some(table))
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        <generatorConfiguration>
            <context id="test">
                <schemaGenerator targetFile="src/schema.rs"/>
                <modelGenerator targetProject="src/model"/>
                <mapperGenerator targetProject="src/mapper"/>
                <table tableName="t_coffee" domainObjectName="Coffee">
                    <generatedKey column="id"/>
                    <column name="id" type="BIGINT" nullable="false" primaryKey="true"/>
                    <column name="name" type="VARCHAR" length="255"/>
                </table>
            </context>
        </generatorConfiguration>
    "#;

    fn parse(xml: &str) -> (Result<GeneratorConfiguration, String>, Vec<String>) {
        let mut warnings = Vec::new();
        let result = ConfigurationParser::new(&mut warnings).parse_configuration(xml);
        (result, warnings)
    }

    #[test]
    fn test_parse_minimal() {
        let (config, warnings) = parse(MINIMAL);
        let config = config.unwrap();

        assert!(warnings.is_empty());
        let context = &config.contexts[0];
        assert_eq!(context.id, "test");
        assert_eq!(context.runtime_path, "mapgen::runtime");
        assert_eq!(context.example_target(), Some("src/model"));

        let table = &context.tables[0];
        assert_eq!(table.table_name, "t_coffee");
        assert_eq!(table.domain_object_name.as_deref(), Some("Coffee"));
        assert_eq!(table.columns.len(), 2);
        assert!(!table.columns[0].nullable);
        assert!(table.columns[0].primary_key);
        assert!(table.columns[1].nullable);
        assert_eq!(table.columns[1].length, Some(255));
        assert!(table.generated_key.as_ref().unwrap().identity);
    }

    #[test]
    fn test_missing_context_is_an_error() {
        let (result, _) = parse("<generatorConfiguration></generatorConfiguration>");
        assert!(result.unwrap_err().contains("no <context>"));
    }

    #[test]
    fn test_missing_mapper_generator_is_an_error() {
        let xml = MINIMAL.replace(r#"<mapperGenerator targetProject="src/mapper"/>"#, "");
        let (result, _) = parse(&xml);
        assert!(result.unwrap_err().contains("missing <mapperGenerator>"));
    }

    #[test]
    fn test_unknown_column_type_is_an_error() {
        let xml = MINIMAL.replace(r#"type="VARCHAR""#, r#"type="GEOMETRY""#);
        let (result, _) = parse(&xml);
        assert!(result.unwrap_err().contains("unsupported type 'GEOMETRY'"));
    }

    #[test]
    fn test_invalid_identifier_is_an_error() {
        let xml = MINIMAL.replace(r#"name="name""#, r#"name="na me""#);
        let (result, _) = parse(&xml);
        assert!(result.unwrap_err().contains("invalid column name"));
    }

    #[test]
    fn test_duplicate_column_is_an_error() {
        let xml = MINIMAL.replace(
            "</table>",
            r#"<column name="NAME" type="TEXT"/></table>"#,
        );
        let (result, _) = parse(&xml);
        assert!(result.unwrap_err().contains("column NAME is declared more than once"));
    }

    #[test]
    fn test_columns_sharing_an_ident_are_an_error() {
        let xml = MINIMAL.replace(
            "</table>",
            r#"<column name="createTime" type="TIMESTAMP"/><column name="create_time" type="TIMESTAMP"/></table>"#,
        );
        let (result, _) = parse(&xml);
        assert!(result
            .unwrap_err()
            .contains("columns createTime and create_time both map to 'create_time'"));

        // ignoring one of them resolves the clash
        let xml = MINIMAL.replace(
            "</table>",
            r#"<column name="createTime" type="TIMESTAMP"/><column name="create_time" type="TIMESTAMP"/><ignoreColumn column="createTime"/></table>"#,
        );
        let (result, _) = parse(&xml);
        assert!(result.is_ok());
    }

    #[test]
    fn test_property_clash_is_an_error() {
        let xml = MINIMAL.replace(
            "</table>",
            r#"<column name="title" type="TEXT"/><columnOverride column="title" property="name"/></table>"#,
        );
        let (result, _) = parse(&xml);
        assert!(result
            .unwrap_err()
            .contains("columns name and title both map to field 'name'"));
    }

    #[test]
    fn test_duplicate_table_warns() {
        let table = r#"<table tableName="T_COFFEE"><column name="id" type="BIGINT"/></table>"#;
        let xml = MINIMAL.replace("</context>", &format!("{}</context>", table));
        let (config, warnings) = parse(&xml);

        assert_eq!(config.unwrap().contexts[0].tables.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("more than once"));
    }

    #[test]
    fn test_table_without_columns_is_skipped() {
        let xml = MINIMAL.replace(
            "</context>",
            r#"<table tableName="t_empty"/></context>"#,
        );
        let (config, warnings) = parse(&xml);

        assert_eq!(config.unwrap().contexts[0].tables.len(), 1);
        assert!(warnings[0].contains("t_empty declares no columns"));
    }

    #[test]
    fn test_unknown_override_and_key_warn() {
        let xml = MINIMAL
            .replace(r#"<generatedKey column="id"/>"#, r#"<generatedKey column="uid"/>"#)
            .replace(
                "</table>",
                r#"<columnOverride column="price" typeHandler="money"/><ignoreColumn column="legacy"/></table>"#,
            );
        let (config, warnings) = parse(&xml);

        assert!(config.unwrap().contexts[0].tables[0].generated_key.is_none());
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("t_coffee.price")));
        assert!(warnings.iter().any(|w| w.contains("t_coffee.legacy")));
        assert!(warnings.iter().any(|w| w.contains("t_coffee.uid")));
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_valid_identifier("t_coffee"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("drop table;"));
        assert!(is_valid_module_path("crate::model"));
        assert!(!is_valid_module_path("crate::"));
    }
}
