//! Model generation: the user-facing model, its stored row and its insert/update view.

use std::fmt::{self, Write};

use super::ModulePaths;
use crate::codegen::types::{ColumnDef, TableDef};
use crate::codegen::utils::{doc_comment, GENERATED_HEADER};

/// `use` lines shared by model and example files.
pub(super) fn value_type_imports(table: &TableDef) -> Vec<&'static str> {
    let mut chrono_types = Vec::new();
    if table.uses_type("NaiveDate") {
        chrono_types.push("NaiveDate");
    }
    if table.uses_type("NaiveDateTime") {
        chrono_types.push("NaiveDateTime");
    }
    match chrono_types.as_slice() {
        [] => vec![],
        [single] if *single == "NaiveDate" => vec!["use chrono::NaiveDate;"],
        [_] => vec!["use chrono::NaiveDateTime;"],
        _ => vec!["use chrono::{NaiveDate, NaiveDateTime};"],
    }
}

fn column_name_attr(column: &ColumnDef) -> Option<String> {
    if column.field != column.ident {
        Some(format!("    #[diesel(column_name = {})]", column.ident))
    } else {
        None
    }
}

fn write_field_doc(output: &mut String, column: &ColumnDef) {
    if let Some(remarks) = &column.remarks {
        output.push_str(&doc_comment(remarks, "    "));
    }
}

/// Render `<module>.rs` for one table.
pub fn generate_model(table: &TableDef, paths: &ModulePaths) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let name = &table.domain_object_name;
    let record = table.record_name();
    let values = table.values_name();

    writeln!(output, "{}", GENERATED_HEADER)?;
    writeln!(output)?;
    for import in value_type_imports(table) {
        writeln!(output, "{}", import)?;
    }
    writeln!(output, "use diesel::prelude::*;")?;
    writeln!(output, "use serde::{{Deserialize, Serialize}};")?;
    writeln!(output)?;
    if table.uses_type("Money") {
        writeln!(output, "use {}::money::Money;", paths.runtime)?;
    }
    writeln!(output, "use {}::{};", paths.schema, table.table_name)?;
    writeln!(output)?;

    // Model: every field optional, builder-style setters.
    writeln!(output, "/// Model for table `{}`.", table.table_name)?;
    writeln!(output, "#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]")?;
    writeln!(output, "pub struct {} {{", name)?;
    for column in &table.columns {
        write_field_doc(&mut output, column);
        writeln!(output, "    pub {}: Option<{}>,", column.field, column.rust_type())?;
    }
    writeln!(output, "}}")?;
    writeln!(output)?;

    writeln!(output, "impl {} {{", name)?;
    writeln!(output, "    pub fn new() -> Self {{")?;
    writeln!(output, "        Self::default()")?;
    writeln!(output, "    }}")?;
    for column in &table.columns {
        let field = &column.field;
        let setter = field.trim_end_matches('_');
        writeln!(output)?;
        if column.is_string() {
            writeln!(output, "    pub fn with_{}(mut self, {}: impl Into<String>) -> Self {{", setter, field)?;
            writeln!(output, "        self.{} = Some({}.into());", field, field)?;
        } else {
            writeln!(output, "    pub fn with_{}(mut self, {}: {}) -> Self {{", setter, field, column.rust_type())?;
            writeln!(output, "        self.{} = Some({});", field, field)?;
        }
        writeln!(output, "        self")?;
        writeln!(output, "    }}")?;
    }
    writeln!(output, "}}")?;
    writeln!(output)?;

    // Stored row: non-null columns are not optional.
    writeln!(output, "/// Row of `{}` as stored.", table.table_name)?;
    writeln!(output, "#[derive(Debug, Clone, Queryable, QueryableByName)]")?;
    writeln!(output, "#[diesel(table_name = {})]", table.table_name)?;
    writeln!(output, "pub struct {} {{", record)?;
    for column in &table.columns {
        if let Some(attr) = column_name_attr(column) {
            writeln!(output, "{}", attr)?;
        }
        if column.nullable {
            writeln!(output, "    pub {}: Option<{}>,", column.field, column.rust_type())?;
        } else {
            writeln!(output, "    pub {}: {},", column.field, column.rust_type())?;
        }
    }
    writeln!(output, "}}")?;
    writeln!(output)?;

    writeln!(output, "impl From<{}> for {} {{", record, name)?;
    writeln!(output, "    fn from(record: {}) -> Self {{", record)?;
    writeln!(output, "        {} {{", name)?;
    for column in &table.columns {
        if column.nullable {
            writeln!(output, "            {}: record.{},", column.field, column.field)?;
        } else {
            writeln!(output, "            {}: Some(record.{}),", column.field, column.field)?;
        }
    }
    writeln!(output, "        }}")?;
    writeln!(output, "    }}")?;
    writeln!(output, "}}")?;
    writeln!(output)?;

    // Insert/update view: borrowed, generated key left out, unset fields skipped.
    writeln!(
        output,
        "/// Column values of a [`{}`] for INSERT and UPDATE; unset fields are left out.",
        name
    )?;
    writeln!(output, "#[derive(Debug, Insertable, AsChangeset)]")?;
    writeln!(
        output,
        "#[diesel(table_name = {}, primary_key({}))]",
        table.table_name,
        table.primary_key().ident
    )?;
    writeln!(output, "pub struct {}<'a> {{", values)?;
    for column in table.value_columns() {
        if let Some(attr) = column_name_attr(column) {
            writeln!(output, "{}", attr)?;
        }
        if column.is_string() {
            writeln!(output, "    pub {}: Option<&'a str>,", column.field)?;
        } else {
            writeln!(output, "    pub {}: Option<&'a {}>,", column.field, column.rust_type())?;
        }
    }
    writeln!(output, "}}")?;
    writeln!(output)?;

    writeln!(output, "impl<'a> From<&'a {}> for {}<'a> {{", name, values)?;
    writeln!(output, "    fn from(model: &'a {}) -> Self {{", name)?;
    writeln!(output, "        {} {{", values)?;
    for column in table.value_columns() {
        let accessor = if column.is_string() { "as_deref" } else { "as_ref" };
        writeln!(output, "            {}: model.{}.{}(),", column.field, column.field, accessor)?;
    }
    writeln!(output, "        }}")?;
    writeln!(output, "    }}")?;
    writeln!(output, "}}")?;

    Ok(output)
}
