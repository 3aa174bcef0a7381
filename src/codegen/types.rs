//! Resolved table model the emitters work from.
//!
//! A [`TableDef`] is a [`TableConfig`] with overrides applied, ignored columns dropped and
//! names decided, so emitters never look at raw configuration.

use regex::Regex;
use serde::Serialize;

use crate::codegen::config::{Context, TableConfig};
use crate::codegen::utils::{to_pascal_case, to_snake_case};

/// Column types understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlType {
    BigInt,
    Integer,
    SmallInt,
    Varchar,
    Text,
    Bool,
    Double,
    Float,
    Timestamp,
    Date,
}

impl SqlType {
    /// Parse a JDBC-style type name such as `BIGINT` or `varchar`.
    pub fn parse(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let sql_type = match upper.as_str() {
            "BIGINT" | "INT8" => SqlType::BigInt,
            "INTEGER" | "INT" | "INT4" => SqlType::Integer,
            "SMALLINT" | "INT2" => SqlType::SmallInt,
            "VARCHAR" | "CHAR" | "NVARCHAR" => SqlType::Varchar,
            "TEXT" | "CLOB" | "LONGVARCHAR" => SqlType::Text,
            "BOOLEAN" | "BOOL" | "BIT" => SqlType::Bool,
            "DOUBLE" | "FLOAT8" => SqlType::Double,
            "REAL" | "FLOAT" | "FLOAT4" => SqlType::Float,
            "TIMESTAMP" | "DATETIME" => SqlType::Timestamp,
            "DATE" => SqlType::Date,
            _ => return None,
        };
        Some(sql_type)
    }

    /// Diesel SQL type name used inside `table!`.
    pub fn diesel_type(&self) -> &'static str {
        match self {
            SqlType::BigInt => "BigInt",
            SqlType::Integer => "Integer",
            SqlType::SmallInt => "SmallInt",
            SqlType::Varchar => "Varchar",
            SqlType::Text => "Text",
            SqlType::Bool => "Bool",
            SqlType::Double => "Double",
            SqlType::Float => "Float",
            SqlType::Timestamp => "Timestamp",
            SqlType::Date => "Date",
        }
    }

    pub fn rust_type(&self) -> &'static str {
        match self {
            SqlType::BigInt => "i64",
            SqlType::Integer => "i32",
            SqlType::SmallInt => "i16",
            SqlType::Varchar | SqlType::Text => "String",
            SqlType::Bool => "bool",
            SqlType::Double => "f64",
            SqlType::Float => "f32",
            SqlType::Timestamp => "NaiveDateTime",
            SqlType::Date => "NaiveDate",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, SqlType::Varchar | SqlType::Text)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, SqlType::BigInt | SqlType::Integer | SqlType::SmallInt)
    }
}

/// Column-level conversion between a SQL type and a domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeHandler {
    /// `BIGINT` minor units as the runtime's `Money`
    Money,
}

impl TypeHandler {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "money" => Some(TypeHandler::Money),
            _ => None,
        }
    }

    pub fn rust_type(&self) -> &'static str {
        match self {
            TypeHandler::Money => "Money",
        }
    }

    pub fn supports(&self, sql_type: SqlType) -> bool {
        match self {
            TypeHandler::Money => sql_type == SqlType::BigInt,
        }
    }
}

/// Strict and reserved keywords of Rust 2021; none can be a plain identifier.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
    // reserved for future use
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

fn rust_ident(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// Identifier of a column inside `table!`.
pub(crate) fn column_ident(column: &str) -> String {
    rust_ident(&to_snake_case(column))
}

/// Model field for a column, honouring a `property` override.
pub(crate) fn field_name(column: &str, property: Option<&str>) -> String {
    match property {
        Some(property) => rust_ident(&to_snake_case(property)),
        None => column_ident(column),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    /// Name in the database.
    pub name: String,
    /// Column identifier inside `table!`.
    pub ident: String,
    /// Field name on the model.
    pub field: String,
    pub sql_type: SqlType,
    pub length: Option<u32>,
    pub nullable: bool,
    pub remarks: Option<String>,
    pub type_handler: Option<TypeHandler>,
}

impl ColumnDef {
    /// Rust type of the value, ignoring nullability.
    pub fn rust_type(&self) -> &'static str {
        match self.type_handler {
            Some(handler) => handler.rust_type(),
            None => self.sql_type.rust_type(),
        }
    }

    pub fn is_string(&self) -> bool {
        self.type_handler.is_none() && self.sql_type.is_text()
    }

    /// Whether the Rust type is `Copy`.
    pub fn is_copy(&self) -> bool {
        self.type_handler.is_none() && !self.sql_type.is_text()
    }

    /// Diesel column type, wrapped in `Nullable` when needed.
    pub fn diesel_column_type(&self) -> String {
        if self.nullable {
            format!("Nullable<{}>", self.sql_type.diesel_type())
        } else {
            self.sql_type.diesel_type().to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDef {
    pub table_name: String,
    pub domain_object_name: String,
    pub columns: Vec<ColumnDef>,
    primary_key: usize,
    generated_key: Option<usize>,
}

impl TableDef {
    /// Resolve a validated table configuration.
    ///
    /// Returns `None` (with a warning) when the table cannot be generated.
    pub fn resolve(table: &TableConfig, warnings: &mut Vec<String>) -> Option<TableDef> {
        let name = &table.table_name;
        let mut columns = Vec::new();
        let mut primary_keys = Vec::new();

        for column in &table.columns {
            if table
                .ignored_columns
                .iter()
                .any(|i| i.column.eq_ignore_ascii_case(&column.name))
            {
                continue;
            }
            // Validated by the parser.
            let sql_type = SqlType::parse(&column.column_type)?;
            let column_override = table
                .column_overrides
                .iter()
                .find(|o| o.column.eq_ignore_ascii_case(&column.name));

            let type_handler = match column_override.and_then(|o| o.type_handler.as_deref()) {
                None => None,
                Some(handler_name) => match TypeHandler::parse(handler_name) {
                    None => {
                        warnings.push(format!(
                            "Unknown type handler '{}' on {}.{}, ignored",
                            handler_name, name, column.name
                        ));
                        None
                    }
                    Some(handler) if !handler.supports(sql_type) => {
                        warnings.push(format!(
                            "Type handler '{}' does not apply to {} column {}.{}, ignored",
                            handler_name,
                            sql_type.diesel_type(),
                            name,
                            column.name
                        ));
                        None
                    }
                    Some(handler) => Some(handler),
                },
            };

            let ident = column_ident(&column.name);
            let field = field_name(&column.name, column_override.and_then(|o| o.property.as_deref()));

            if column.primary_key {
                primary_keys.push(columns.len());
            }
            columns.push(ColumnDef {
                name: column.name.clone(),
                ident,
                field,
                sql_type,
                length: column.length,
                nullable: column.nullable && !column.primary_key,
                remarks: column.remarks.clone(),
                type_handler,
            });
        }

        let identity_key = match &table.generated_key {
            Some(key) if !key.identity => {
                warnings.push(format!(
                    "Generated key {}.{} is not an identity column; only identity keys are read back, treated as a plain column",
                    name, key.column
                ));
                None
            }
            other => other.as_ref(),
        };
        let generated_key = identity_key
            .and_then(|key| {
                columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(&key.column))
            })
            .filter(|&index| {
                let column = &columns[index];
                let integer = column.type_handler.is_none() && column.sql_type.is_integer();
                if !integer {
                    warnings.push(format!(
                        "Generated key {}.{} is not an integer column, treated as a plain column",
                        name, column.name
                    ));
                }
                integer
            });

        if primary_keys.is_empty() {
            if let Some(index) = generated_key {
                primary_keys.push(index);
                columns[index].nullable = false;
            }
        }

        let primary_key = match primary_keys.as_slice() {
            [single] => *single,
            [] => {
                warnings.push(format!("Table {} has no primary key, skipped", name));
                return None;
            }
            _ => {
                warnings.push(format!(
                    "Table {} has a composite primary key, which is not supported, skipped",
                    name
                ));
                return None;
            }
        };

        Some(TableDef {
            table_name: name.clone(),
            domain_object_name: domain_object_name(table),
            columns,
            primary_key,
            generated_key,
        })
    }

    pub fn primary_key(&self) -> &ColumnDef {
        &self.columns[self.primary_key]
    }

    pub fn generated_key(&self) -> Option<&ColumnDef> {
        self.generated_key.map(|i| &self.columns[i])
    }

    /// Columns written by `insert` and `update`: everything but the generated key.
    pub fn value_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != self.generated_key)
            .map(|(_, c)| c)
    }

    /// File stem of the model, e.g. `coffee`.
    pub fn module_name(&self) -> String {
        to_snake_case(&self.domain_object_name)
    }

    pub fn record_name(&self) -> String {
        format!("{}Record", self.domain_object_name)
    }

    pub fn values_name(&self) -> String {
        format!("{}Values", self.domain_object_name)
    }

    pub fn example_name(&self) -> String {
        format!("{}Example", self.domain_object_name)
    }

    pub fn criteria_name(&self) -> String {
        format!("{}Criteria", self.domain_object_name)
    }

    pub fn mapper_name(&self) -> String {
        format!("{}Mapper", self.domain_object_name)
    }

    pub fn uses_type(&self, rust_type: &str) -> bool {
        self.columns.iter().any(|c| c.rust_type() == rust_type)
    }
}

/// `domainObjectName` if given, otherwise the table name after the renaming rule, in PascalCase.
fn domain_object_name(table: &TableConfig) -> String {
    if let Some(name) = &table.domain_object_name {
        return name.clone();
    }
    let mut base = table.table_name.clone();
    if let Some(rule) = &table.renaming_rule {
        if let Ok(re) = Regex::new(&rule.search_string) {
            base = re.replace_all(&base, rule.replace_string.as_str()).into_owned();
        }
    }
    to_pascal_case(&base.to_lowercase())
}

/// Resolve every table of a context, dropping the ones that cannot be generated.
pub fn resolve_tables(context: &Context, warnings: &mut Vec<String>) -> Vec<TableDef> {
    context
        .tables
        .iter()
        .filter_map(|table| TableDef::resolve(table, warnings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::config::{ColumnConfig, ColumnOverride, GeneratedKeyConfig, RenamingRule};

    fn column(name: &str, column_type: &str) -> ColumnConfig {
        ColumnConfig {
            name: name.to_string(),
            column_type: column_type.to_string(),
            length: None,
            nullable: true,
            primary_key: false,
            remarks: None,
        }
    }

    fn coffee_table() -> TableConfig {
        TableConfig {
            table_name: "t_coffee".to_string(),
            domain_object_name: None,
            renaming_rule: None,
            generated_key: Some(GeneratedKeyConfig {
                column: "id".to_string(),
                identity: true,
            }),
            columns: vec![
                column("id", "BIGINT"),
                column("name", "VARCHAR"),
                column("price", "BIGINT"),
                column("create_time", "TIMESTAMP"),
            ],
            column_overrides: vec![],
            ignored_columns: vec![],
        }
    }

    #[test]
    fn test_sql_type_parse() {
        assert_eq!(SqlType::parse("bigint"), Some(SqlType::BigInt));
        assert_eq!(SqlType::parse("DATETIME"), Some(SqlType::Timestamp));
        assert_eq!(SqlType::parse("GEOMETRY"), None);
        assert_eq!(SqlType::Varchar.rust_type(), "String");
    }

    #[test]
    fn test_generated_key_becomes_primary_key() {
        let mut warnings = Vec::new();
        let table = TableDef::resolve(&coffee_table(), &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(table.primary_key().name, "id");
        assert!(!table.primary_key().nullable);
        assert_eq!(table.generated_key().map(|c| c.name.as_str()), Some("id"));
        let values: Vec<_> = table.value_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(values, vec!["name", "price", "create_time"]);
    }

    #[test]
    fn test_domain_object_naming() {
        let mut warnings = Vec::new();
        let plain = TableDef::resolve(&coffee_table(), &mut warnings).unwrap();
        assert_eq!(plain.domain_object_name, "TCoffee");

        let mut renamed = coffee_table();
        renamed.renaming_rule = Some(RenamingRule {
            search_string: "^t_".to_string(),
            replace_string: String::new(),
        });
        let renamed = TableDef::resolve(&renamed, &mut warnings).unwrap();
        assert_eq!(renamed.domain_object_name, "Coffee");
        assert_eq!(renamed.module_name(), "coffee");
        assert_eq!(renamed.mapper_name(), "CoffeeMapper");
    }

    #[test]
    fn test_type_handler_overrides() {
        let mut table = coffee_table();
        table.column_overrides = vec![
            ColumnOverride {
                column: "price".to_string(),
                property: Some("unitPrice".to_string()),
                type_handler: Some("money".to_string()),
            },
            ColumnOverride {
                column: "name".to_string(),
                property: None,
                type_handler: Some("money".to_string()),
            },
            ColumnOverride {
                column: "create_time".to_string(),
                property: None,
                type_handler: Some("uuid".to_string()),
            },
        ];

        let mut warnings = Vec::new();
        let resolved = TableDef::resolve(&table, &mut warnings).unwrap();

        let price = &resolved.columns[2];
        assert_eq!(price.type_handler, Some(TypeHandler::Money));
        assert_eq!(price.rust_type(), "Money");
        assert_eq!(price.field, "unit_price");
        assert_eq!(price.ident, "price");
        assert_eq!(resolved.columns[1].type_handler, None);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("does not apply"));
        assert!(warnings[1].contains("Unknown type handler 'uuid'"));
    }

    #[test]
    fn test_tables_without_single_key_are_skipped() {
        let mut no_key = coffee_table();
        no_key.generated_key = None;
        let mut warnings = Vec::new();
        assert!(TableDef::resolve(&no_key, &mut warnings).is_none());
        assert!(warnings[0].contains("no primary key"));

        let mut composite = coffee_table();
        composite.columns[0].primary_key = true;
        composite.columns[1].primary_key = true;
        assert!(TableDef::resolve(&composite, &mut warnings).is_none());
        assert!(warnings[1].contains("composite"));
    }

    #[test]
    fn test_ignored_columns_and_keywords() {
        let mut table = coffee_table();
        table.columns.push(column("type", "VARCHAR"));
        table.ignored_columns = vec![crate::codegen::config::IgnoreColumn {
            column: "create_time".to_string(),
        }];

        let mut warnings = Vec::new();
        let resolved = TableDef::resolve(&table, &mut warnings).unwrap();
        let names: Vec<_> = resolved.columns.iter().map(|c| c.ident.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "price", "type_"]);
    }

    #[test]
    fn test_reserved_keywords_are_escaped() {
        let mut table = coffee_table();
        table.columns.push(column("final", "INTEGER"));
        table.columns.push(column("abstract", "INTEGER"));
        table.columns.push(column("try", "INTEGER"));
        table.columns.push(column("order", "INTEGER"));

        let mut warnings = Vec::new();
        let resolved = TableDef::resolve(&table, &mut warnings).unwrap();
        let idents: Vec<_> = resolved.columns[4..].iter().map(|c| c.ident.as_str()).collect();
        assert_eq!(idents, vec!["final_", "abstract_", "try_", "order"]);
        assert_eq!(field_name("x", Some("Self")), "self_");
    }

    #[test]
    fn test_non_identity_generated_key_is_a_plain_column() {
        let mut table = coffee_table();
        table.columns[0].primary_key = true;
        table.generated_key = Some(GeneratedKeyConfig {
            column: "id".to_string(),
            identity: false,
        });

        let mut warnings = Vec::new();
        let resolved = TableDef::resolve(&table, &mut warnings).unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("t_coffee.id is not an identity column"));
        assert!(warnings[0].contains("treated as a plain column"));
        assert!(resolved.generated_key().is_none());
        assert_eq!(resolved.primary_key().name, "id");
        let values: Vec<_> = resolved.value_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(values, vec!["id", "name", "price", "create_time"]);
    }

    #[test]
    fn test_text_generated_key_is_a_plain_column() {
        let mut table = coffee_table();
        table.generated_key = Some(GeneratedKeyConfig {
            column: "name".to_string(),
            identity: true,
        });
        table.columns[0].primary_key = true;

        let mut warnings = Vec::new();
        let resolved = TableDef::resolve(&table, &mut warnings).unwrap();

        assert!(resolved.generated_key().is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("t_coffee.name is not an integer column"));
    }
}
