//! Diesel `table!` generation.

use std::fmt::{self, Write};

use crate::codegen::types::TableDef;
use crate::codegen::utils::{doc_comment, GENERATED_HEADER};

/// Render one `diesel::table!` per table into a single schema module.
pub fn generate_schema(tables: &[TableDef]) -> Result<String, fmt::Error> {
    let mut output = String::new();

    writeln!(output, "{}", GENERATED_HEADER)?;

    for table in tables {
        writeln!(output)?;
        writeln!(output, "diesel::table! {{")?;
        writeln!(output, "    {} ({}) {{", table.table_name, table.primary_key().ident)?;

        for column in &table.columns {
            if let Some(remarks) = &column.remarks {
                output.push_str(&doc_comment(remarks, "        "));
            }
            if column.ident != column.name {
                writeln!(output, "        #[sql_name = \"{}\"]", column.name)?;
            }
            writeln!(output, "        {} -> {},", column.ident, column.diesel_column_type())?;
        }

        writeln!(output, "    }}")?;
        writeln!(output, "}}")?;
    }

    if tables.len() > 1 {
        writeln!(output)?;
        let names: Vec<&str> = tables.iter().map(|t| t.table_name.as_str()).collect();
        writeln!(output, "diesel::allow_tables_to_appear_in_same_query!(")?;
        writeln!(output, "    {},", names.join(",\n    "))?;
        writeln!(output, ");")?;
    }

    Ok(output)
}
