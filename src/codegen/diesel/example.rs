//! Example/criteria generation: typed predicate builders over the runtime `Example`.

use std::fmt::{self, Write};

use super::models::value_type_imports;
use super::ModulePaths;
use crate::codegen::types::{ColumnDef, TableDef};
use crate::codegen::utils::GENERATED_HEADER;

const COMPARISONS: &[(&str, &str)] = &[
    ("equal_to", "Equal"),
    ("not_equal_to", "NotEqual"),
    ("greater_than", "GreaterThan"),
    ("greater_than_or_equal_to", "GreaterThanOrEqual"),
    ("less_than", "LessThan"),
    ("less_than_or_equal_to", "LessThanOrEqual"),
];

/// Parameter type and conversion expression for one value argument.
fn value_param(column: &ColumnDef, arg: &str) -> (String, String) {
    if column.is_string() {
        (
            "impl Into<String>".to_string(),
            format!("Value::Text({}.into())", arg),
        )
    } else {
        (column.rust_type().to_string(), format!("Value::from({})", arg))
    }
}

fn write_criteria_methods(output: &mut String, column: &ColumnDef) -> fmt::Result {
    let prefix = format!("and_{}", column.field.trim_end_matches('_'));
    let col = &column.name;

    writeln!(output)?;
    writeln!(output, "    pub fn {}_is_null(self) -> Self {{", prefix)?;
    writeln!(output, "        self.add(\"{}\", Condition::IsNull)", col)?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    pub fn {}_is_not_null(self) -> Self {{", prefix)?;
    writeln!(output, "        self.add(\"{}\", Condition::IsNotNull)", col)?;
    writeln!(output, "    }}")?;

    let (param, convert) = value_param(column, "value");
    for (suffix, operator) in COMPARISONS {
        writeln!(output)?;
        writeln!(output, "    pub fn {}_{}(self, value: {}) -> Self {{", prefix, suffix, param)?;
        writeln!(
            output,
            "        self.add(\"{}\", Condition::Compare(Operator::{}, {}))",
            col, operator, convert
        )?;
        writeln!(output, "    }}")?;
    }

    if column.is_string() {
        for (suffix, condition) in [("like", "Like"), ("not_like", "NotLike")] {
            writeln!(output)?;
            writeln!(output, "    pub fn {}_{}(self, pattern: impl Into<String>) -> Self {{", prefix, suffix)?;
            writeln!(output, "        self.add(\"{}\", Condition::{}(pattern.into()))", col, condition)?;
            writeln!(output, "    }}")?;
        }
    }

    for (suffix, condition) in [("in", "In"), ("not_in", "NotIn")] {
        writeln!(output)?;
        if column.is_string() {
            writeln!(output, "    pub fn {}_{}<I, S>(self, values: I) -> Self", prefix, suffix)?;
            writeln!(output, "    where")?;
            writeln!(output, "        I: IntoIterator<Item = S>,")?;
            writeln!(output, "        S: Into<String>,")?;
            writeln!(output, "    {{")?;
            writeln!(
                output,
                "        self.add(\"{}\", Condition::{}(values.into_iter().map(|v| Value::Text(v.into())).collect()))",
                col, condition
            )?;
        } else {
            writeln!(
                output,
                "    pub fn {}_{}(self, values: impl IntoIterator<Item = {}>) -> Self {{",
                prefix,
                suffix,
                column.rust_type()
            )?;
            writeln!(
                output,
                "        self.add(\"{}\", Condition::{}(values.into_iter().map(Value::from).collect()))",
                col, condition
            )?;
        }
        writeln!(output, "    }}")?;
    }

    let (low_param, low) = value_param(column, "low");
    let (high_param, high) = value_param(column, "high");
    for (suffix, condition) in [("between", "Between"), ("not_between", "NotBetween")] {
        writeln!(output)?;
        writeln!(
            output,
            "    pub fn {}_{}(self, low: {}, high: {}) -> Self {{",
            prefix, suffix, low_param, high_param
        )?;
        writeln!(output, "        self.add(\"{}\", Condition::{}({}, {}))", col, condition, low, high)?;
        writeln!(output, "    }}")?;
    }

    Ok(())
}

/// Render `<module>_example.rs` for one table.
pub fn generate_example(table: &TableDef, paths: &ModulePaths) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let example = table.example_name();
    let criteria = table.criteria_name();

    writeln!(output, "{}", GENERATED_HEADER)?;
    writeln!(output)?;
    let chrono_imports = value_type_imports(table);
    for import in &chrono_imports {
        writeln!(output, "{}", import)?;
    }
    if !chrono_imports.is_empty() {
        writeln!(output)?;
    }
    writeln!(
        output,
        "use {}::criteria::{{Condition, Criteria, Example, Operator, Value}};",
        paths.runtime
    )?;
    if table.uses_type("Money") {
        writeln!(output, "use {}::money::Money;", paths.runtime)?;
    }
    writeln!(output)?;

    writeln!(output, "/// Criteria for `{}` queries.", table.table_name)?;
    writeln!(output, "#[derive(Debug, Clone, Default, PartialEq)]")?;
    writeln!(output, "pub struct {} {{", example)?;
    writeln!(output, "    example: Example,")?;
    writeln!(output, "}}")?;
    writeln!(output)?;

    writeln!(output, "impl {} {{", example)?;
    writeln!(output, "    pub fn new() -> Self {{")?;
    writeln!(output, "        Self::default()")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    /// The first criteria group; further groups come from [`{}::or`].", example)?;
    writeln!(output, "    pub fn create_criteria(&mut self) -> {}<'_> {{", criteria)?;
    writeln!(output, "        {} {{", criteria)?;
    writeln!(output, "            criteria: self.example.create_criteria(),")?;
    writeln!(output, "        }}")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    pub fn or(&mut self) -> {}<'_> {{", criteria)?;
    writeln!(output, "        {} {{", criteria)?;
    writeln!(output, "            criteria: self.example.or(),")?;
    writeln!(output, "        }}")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    pub fn set_order_by_clause(&mut self, clause: impl Into<String>) {{")?;
    writeln!(output, "        self.example.set_order_by_clause(clause);")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    pub fn set_distinct(&mut self, distinct: bool) {{")?;
    writeln!(output, "        self.example.set_distinct(distinct);")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    pub fn clear(&mut self) {{")?;
    writeln!(output, "        self.example.clear();")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    pub fn as_example(&self) -> &Example {{")?;
    writeln!(output, "        &self.example")?;
    writeln!(output, "    }}")?;
    writeln!(output, "}}")?;
    writeln!(output)?;

    writeln!(output, "/// AND-ed predicates on `{}` columns.", table.table_name)?;
    writeln!(output, "pub struct {}<'a> {{", criteria)?;
    writeln!(output, "    criteria: &'a mut Criteria,")?;
    writeln!(output, "}}")?;
    writeln!(output)?;
    writeln!(output, "impl<'a> {}<'a> {{", criteria)?;
    writeln!(output, "    fn add(self, column: &'static str, condition: Condition) -> Self {{")?;
    writeln!(output, "        self.criteria.add(column, condition);")?;
    writeln!(output, "        self")?;
    writeln!(output, "    }}")?;
    for column in &table.columns {
        write_criteria_methods(&mut output, column)?;
    }
    writeln!(output, "}}")?;

    Ok(output)
}
