//! Diesel source emitters.
//!
//! Each emitter renders one artifact for resolved tables and returns the source text;
//! writing it out is the generator's job.

mod schema;
mod models;
mod example;
mod mapper;

pub use schema::generate_schema;
pub use models::generate_model;
pub use example::generate_example;
pub use mapper::generate_mapper;

use crate::codegen::config::Context;

/// Module paths generated code uses to refer to other artifacts and the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePaths {
    pub runtime: String,
    pub schema: String,
    pub model: String,
    pub example: String,
}

impl ModulePaths {
    pub fn from_context(context: &Context) -> Self {
        ModulePaths {
            runtime: context.runtime_path.clone(),
            schema: context.schema_module(),
            model: context.model_module(),
            example: context.example_module(),
        }
    }
}

impl Default for ModulePaths {
    fn default() -> Self {
        ModulePaths {
            runtime: "mapgen::runtime".to_string(),
            schema: "crate::schema".to_string(),
            model: "crate::model".to_string(),
            example: "crate::model".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::config::{ColumnConfig, ColumnOverride, TableConfig};
    use crate::codegen::types::TableDef;

    fn column(name: &str, column_type: &str, primary_key: bool) -> ColumnConfig {
        ColumnConfig {
            name: name.to_string(),
            column_type: column_type.to_string(),
            length: None,
            nullable: !primary_key,
            primary_key,
            remarks: None,
        }
    }

    /// Natural string key, a keyword column and a renamed property.
    fn tag_table() -> TableDef {
        let config = TableConfig {
            table_name: "tag".to_string(),
            domain_object_name: None,
            renaming_rule: None,
            generated_key: None,
            columns: vec![
                column("code", "VARCHAR", true),
                column("type", "INTEGER", false),
                column("label", "TEXT", false),
            ],
            column_overrides: vec![ColumnOverride {
                column: "label".to_string(),
                property: Some("title".to_string()),
                type_handler: None,
            }],
            ignored_columns: vec![],
        };
        let mut warnings = Vec::new();
        let table = TableDef::resolve(&config, &mut warnings).unwrap();
        assert!(warnings.is_empty());
        table
    }

    #[test]
    fn test_schema_renames_keyword_columns() {
        let schema = generate_schema(&[tag_table()]).unwrap();

        assert!(schema.contains("    tag (code) {"));
        assert!(schema.contains("        #[sql_name = \"type\"]\n        type_ -> Nullable<Integer>,"));
        assert!(!schema.contains("allow_tables_to_appear_in_same_query"));
    }

    #[test]
    fn test_model_maps_property_to_column() {
        let model = generate_model(&tag_table(), &ModulePaths::default()).unwrap();

        assert!(model.contains("pub title: Option<String>,"));
        assert!(model.contains("    #[diesel(column_name = label)]\n    pub title: Option<String>,"));
        assert!(model.contains("pub fn with_type(mut self, type_: i32) -> Self {"));
        assert!(model.contains("#[diesel(table_name = tag, primary_key(code))]"));
        // Without a generated key the key is part of the insert values.
        assert!(model.contains("pub code: Option<&'a str>,"));
        assert!(!model.contains("NaiveDateTime"));
        assert!(!model.contains("Money"));
    }

    #[test]
    fn test_mapper_without_generated_key() {
        let mapper = generate_mapper(&tag_table(), &ModulePaths::default()).unwrap();

        assert!(mapper.contains(
            "const COLUMNS: &[(&str, &str)] = &[\n    (\"code\", \"code\"),\n    (\"type\", \"type_\"),\n    (\"label\", \"label\"),\n];"
        ));
        assert!(mapper.contains("pub fn select_by_primary_key(&self, code: &str)"));
        assert!(mapper.contains("let key = record.code.as_ref().ok_or(MapperError::MissingPrimaryKey(TABLE))?;"));
        assert!(!mapper.contains("transaction"));
        assert!(mapper.contains("use mapgen::runtime::error::MapperError;"));
    }

    #[test]
    fn test_example_skips_like_for_non_text() {
        let example = generate_example(&tag_table(), &ModulePaths::default()).unwrap();

        assert!(example.contains("pub struct TagExample"));
        assert!(example.contains("pub fn and_code_like("));
        assert!(example.contains("pub fn and_title_like("));
        assert!(!example.contains("and_type_like"));
    }
}
