//! Mapper generation: one struct per table exposing its statements.

use std::fmt::{self, Write};

use super::ModulePaths;
use crate::codegen::types::TableDef;
use crate::codegen::utils::GENERATED_HEADER;

/// Backend selection under which the runtime's connection is MySQL.
const MYSQL_CFG: &str = "all(feature = \"mysql\", not(feature = \"postgres\"))";

/// Render `<module>_mapper.rs` for one table.
pub fn generate_mapper(table: &TableDef, paths: &ModulePaths) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let name = &table.domain_object_name;
    let module = table.module_name();
    let mapper = table.mapper_name();
    let record = table.record_name();
    let values = table.values_name();
    let example = table.example_name();
    let tbl = &table.table_name;
    let pk = table.primary_key();
    let pk_type = if pk.is_string() { "&str" } else { pk.rust_type() };

    writeln!(output, "{}", GENERATED_HEADER)?;
    writeln!(output)?;
    writeln!(output, "use diesel::prelude::*;")?;
    writeln!(output)?;
    writeln!(output, "use {}::{}::{{{}, {}, {}}};", paths.model, module, name, record, values)?;
    writeln!(output, "use {}::{}_example::{};", paths.example, module, example)?;
    writeln!(output, "use {}::criteria::Dialect;", paths.runtime)?;
    writeln!(output, "use {}::database::Pool;", paths.runtime)?;
    writeln!(output, "use {}::error::MapperError;", paths.runtime)?;
    writeln!(output, "use {}::{};", paths.schema, tbl)?;
    writeln!(output)?;

    writeln!(output, "const TABLE: &str = \"{}\";", tbl)?;
    // Rows are read back by name, so renamed columns are aliased to their ident.
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("(\"{}\", \"{}\")", c.name, c.ident))
        .collect();
    writeln!(output, "const COLUMNS: &[(&str, &str)] = &[")?;
    for column in &columns {
        writeln!(output, "    {},", column)?;
    }
    writeln!(output, "];")?;
    writeln!(output)?;

    writeln!(output, "/// Statements for table `{}`.", tbl)?;
    writeln!(output, "#[derive(Clone)]")?;
    writeln!(output, "pub struct {} {{", mapper)?;
    writeln!(output, "    pool: Pool,")?;
    writeln!(output, "}}")?;
    writeln!(output)?;
    writeln!(output, "impl {} {{", mapper)?;
    writeln!(output, "    pub fn new(pool: Pool) -> Self {{")?;
    writeln!(output, "        {} {{ pool }}", mapper)?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    // insert
    match table.generated_key() {
        Some(key) => {
            writeln!(
                output,
                "    /// Insert a record. The generated `{}` is written back into `record`.",
                key.field
            )?;
            writeln!(output, "    pub fn insert(&self, record: &mut {}) -> Result<usize, MapperError> {{", name)?;
            writeln!(output, "        let mut conn = self.pool.get()?;")?;
            writeln!(output, "        let values = {}::from(&*record);", values)?;
            writeln!(output, "        #[cfg(not({}))]", MYSQL_CFG)?;
            writeln!(output, "        let key = diesel::insert_into({}::table)", tbl)?;
            writeln!(output, "            .values(&values)")?;
            writeln!(output, "            .returning({}::{})", tbl, key.ident)?;
            writeln!(output, "            .get_result::<{}>(&mut conn)?;", key.rust_type())?;
            writeln!(output, "        #[cfg({})]", MYSQL_CFG)?;
            writeln!(output, "        let key = conn.transaction::<_, diesel::result::Error, _>(|conn| {{")?;
            writeln!(output, "            diesel::insert_into({}::table)", tbl)?;
            writeln!(output, "                .values(&values)")?;
            writeln!(output, "                .execute(conn)?;")?;
            writeln!(
                output,
                "            {}::database::last_insert_id::<{}>(conn)",
                paths.runtime,
                key.rust_type()
            )?;
            writeln!(output, "        }})?;")?;
            writeln!(output, "        record.{} = Some(key);", key.field)?;
            writeln!(output, "        Ok(1)")?;
            writeln!(output, "    }}")?;
        }
        None => {
            writeln!(output, "    /// Insert a record; unset fields take their column defaults.")?;
            writeln!(output, "    pub fn insert(&self, record: &mut {}) -> Result<usize, MapperError> {{", name)?;
            writeln!(output, "        let mut conn = self.pool.get()?;")?;
            writeln!(output, "        let rows = diesel::insert_into({}::table)", tbl)?;
            writeln!(output, "            .values(&{}::from(&*record))", values)?;
            writeln!(output, "            .execute(&mut conn)?;")?;
            writeln!(output, "        Ok(rows)")?;
            writeln!(output, "    }}")?;
        }
    }
    writeln!(output)?;

    // select_by_primary_key
    writeln!(
        output,
        "    pub fn select_by_primary_key(&self, {}: {}) -> Result<Option<{}>, MapperError> {{",
        pk.field, pk_type, name
    )?;
    writeln!(output, "        let mut conn = self.pool.get()?;")?;
    writeln!(output, "        let record = {}::table", tbl)?;
    writeln!(output, "            .find({})", pk.field)?;
    writeln!(output, "            .first::<{}>(&mut conn)", record)?;
    writeln!(output, "            .optional()?;")?;
    writeln!(output, "        Ok(record.map({}::from))", name)?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    // select_by_example
    writeln!(
        output,
        "    pub fn select_by_example(&self, example: &{}) -> Result<Vec<{}>, MapperError> {{",
        example, name
    )?;
    writeln!(output, "        let mut conn = self.pool.get()?;")?;
    writeln!(output, "        let records = example")?;
    writeln!(output, "            .as_example()")?;
    writeln!(output, "            .select_statement(TABLE, COLUMNS, Dialect::current())")?;
    writeln!(output, "            .load::<{}>(&mut conn)?;", record)?;
    writeln!(output, "        Ok(records.into_iter().map({}::from).collect())", name)?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    // count_by_example
    writeln!(output, "    pub fn count_by_example(&self, example: &{}) -> Result<i64, MapperError> {{", example)?;
    writeln!(output, "        let mut conn = self.pool.get()?;")?;
    writeln!(output, "        let count = example")?;
    writeln!(output, "            .as_example()")?;
    writeln!(output, "            .count_statement(TABLE, Dialect::current())")?;
    writeln!(output, "            .count(&mut conn)?;")?;
    writeln!(output, "        Ok(count)")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    // delete_by_primary_key
    writeln!(
        output,
        "    pub fn delete_by_primary_key(&self, {}: {}) -> Result<usize, MapperError> {{",
        pk.field, pk_type
    )?;
    writeln!(output, "        let mut conn = self.pool.get()?;")?;
    writeln!(output, "        let rows = diesel::delete({}::table.find({})).execute(&mut conn)?;", tbl, pk.field)?;
    writeln!(output, "        Ok(rows)")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    // delete_by_example
    writeln!(output, "    pub fn delete_by_example(&self, example: &{}) -> Result<usize, MapperError> {{", example)?;
    writeln!(output, "        let mut conn = self.pool.get()?;")?;
    writeln!(output, "        let rows = example")?;
    writeln!(output, "            .as_example()")?;
    writeln!(output, "            .delete_statement(TABLE, Dialect::current())")?;
    writeln!(output, "            .execute(&mut conn)?;")?;
    writeln!(output, "        Ok(rows)")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    // update_by_primary_key_selective
    writeln!(output, "    /// Update the fields of `record` that are set, matching on its `{}`.", pk.field)?;
    writeln!(
        output,
        "    pub fn update_by_primary_key_selective(&self, record: &{}) -> Result<usize, MapperError> {{",
        name
    )?;
    let key_expr = if pk.is_copy() {
        format!("record.{}", pk.field)
    } else {
        format!("record.{}.as_ref()", pk.field)
    };
    writeln!(output, "        let key = {}.ok_or(MapperError::MissingPrimaryKey(TABLE))?;", key_expr)?;
    writeln!(output, "        let mut conn = self.pool.get()?;")?;
    writeln!(output, "        let rows = diesel::update({}::table.find(key))", tbl)?;
    writeln!(output, "            .set(&{}::from(record))", values)?;
    writeln!(output, "            .execute(&mut conn)?;")?;
    writeln!(output, "        Ok(rows)")?;
    writeln!(output, "    }}")?;
    writeln!(output, "}}")?;

    Ok(output)
}
