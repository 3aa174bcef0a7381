//! Dynamic WHERE-clause predicates behind the generated `*Example` types.
//!
//! An [`Example`] holds OR-ed [`Criteria`]; each criteria is a list of AND-ed [`Criterion`].
//! Column names come from generated code, values always travel as bind parameters.

use chrono::{NaiveDate, NaiveDateTime};

use crate::runtime::money::Money;
use crate::runtime::statement::SqlStatement;

/// A bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    BigInt(i64),
    Integer(i32),
    SmallInt(i16),
    Text(String),
    Bool(bool),
    Double(f64),
    Float(f32),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    i64 => BigInt,
    i32 => Integer,
    i16 => SmallInt,
    String => Text,
    bool => Bool,
    f64 => Double,
    f32 => Float,
    NaiveDateTime => Timestamp,
    NaiveDate => Date,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::BigInt(v.amount_minor())
    }
}

impl From<&Money> for Value {
    fn from(v: &Money) -> Self {
        Value::BigInt(v.amount_minor())
    }
}

/// SQL flavour of the target database: placeholder and identifier quoting syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `?` placeholders, `"ident"`
    Sqlite,
    /// `$1`, `$2`, ... numbered across the whole statement, `"ident"`
    Postgres,
    /// `?` placeholders, `` `ident` ``
    Mysql,
}

impl Dialect {
    /// Dialect of the backend this crate was compiled for.
    pub fn current() -> Self {
        if cfg!(feature = "postgres") {
            Dialect::Postgres
        } else if cfg!(feature = "mysql") {
            Dialect::Mysql
        } else {
            Dialect::Sqlite
        }
    }

    /// Placeholder for the bind at 1-based `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", index),
            Dialect::Sqlite | Dialect::Mysql => "?".to_string(),
        }
    }

    pub fn identifier_quote(&self) -> char {
        match self {
            Dialect::Mysql => '`',
            Dialect::Sqlite | Dialect::Postgres => '"',
        }
    }

    /// Quote an identifier, doubling any embedded quote character.
    pub fn escape_identifier(&self, identifier: &str) -> String {
        let quote = self.identifier_quote();
        let doubled: String = [quote, quote].iter().collect();
        format!(
            "{}{}{}",
            quote,
            identifier.replace(quote, &doubled),
            quote
        )
    }
}

/// Accumulates SQL text and binds while rendering.
#[derive(Debug)]
pub(crate) struct SqlWriter {
    dialect: Dialect,
    sql: String,
    binds: Vec<Value>,
}

impl SqlWriter {
    pub(crate) fn new(dialect: Dialect) -> Self {
        SqlWriter {
            dialect,
            sql: String::new(),
            binds: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub(crate) fn push_identifier(&mut self, identifier: &str) {
        let quoted = self.dialect.escape_identifier(identifier);
        self.sql.push_str(&quoted);
    }

    pub(crate) fn bind(&mut self, value: Value) {
        self.binds.push(value);
        let placeholder = self.dialect.placeholder(self.binds.len());
        self.sql.push_str(&placeholder);
    }

    pub(crate) fn finish(self) -> SqlStatement {
        SqlStatement::new(self.sql, self.binds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Operator {
    fn as_sql(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    IsNull,
    IsNotNull,
    Compare(Operator, Value),
    Like(String),
    NotLike(String),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Between(Value, Value),
    NotBetween(Value, Value),
}

/// One predicate on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub column: &'static str,
    pub condition: Condition,
}

impl Criterion {
    fn render(&self, out: &mut SqlWriter) {
        match &self.condition {
            Condition::In(values) if values.is_empty() => return out.push("1 = 0"),
            Condition::NotIn(values) if values.is_empty() => return out.push("1 = 1"),
            _ => {}
        }

        out.push_identifier(self.column);
        match &self.condition {
            Condition::IsNull => out.push(" is null"),
            Condition::IsNotNull => out.push(" is not null"),
            Condition::Compare(op, value) => {
                out.push(&format!(" {} ", op.as_sql()));
                out.bind(value.clone());
            }
            Condition::Like(pattern) => {
                out.push(" like ");
                out.bind(Value::Text(pattern.clone()));
            }
            Condition::NotLike(pattern) => {
                out.push(" not like ");
                out.bind(Value::Text(pattern.clone()));
            }
            Condition::In(values) | Condition::NotIn(values) => {
                let keyword = if matches!(self.condition, Condition::In(_)) {
                    " in ("
                } else {
                    " not in ("
                };
                out.push(keyword);
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(", ");
                    }
                    out.bind(value.clone());
                }
                out.push(")");
            }
            Condition::Between(low, high) | Condition::NotBetween(low, high) => {
                let keyword = if matches!(self.condition, Condition::Between(..)) {
                    " between "
                } else {
                    " not between "
                };
                out.push(keyword);
                out.bind(low.clone());
                out.push(" and ");
                out.bind(high.clone());
            }
        }
    }
}

/// AND-ed predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, column: &'static str, condition: Condition) -> &mut Self {
        self.criteria.push(Criterion { column, condition });
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }
}

/// Query criteria shared by every generated example type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    ored_criteria: Vec<Criteria>,
    order_by_clause: Option<String>,
    distinct: bool,
}

impl Example {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first criteria group, created on demand. Further groups come from [`Example::or`].
    pub fn create_criteria(&mut self) -> &mut Criteria {
        if self.ored_criteria.is_empty() {
            self.ored_criteria.push(Criteria::new());
        }
        &mut self.ored_criteria[0]
    }

    /// Append a new group that is OR-ed with the existing ones.
    pub fn or(&mut self) -> &mut Criteria {
        self.ored_criteria.push(Criteria::new());
        let last = self.ored_criteria.len() - 1;
        &mut self.ored_criteria[last]
    }

    pub fn ored_criteria(&self) -> &[Criteria] {
        &self.ored_criteria
    }

    /// Raw `ORDER BY` text, inserted verbatim.
    pub fn set_order_by_clause(&mut self, clause: impl Into<String>) {
        self.order_by_clause = Some(clause.into());
    }

    pub fn order_by_clause(&self) -> Option<&str> {
        self.order_by_clause.as_deref()
    }

    pub fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn clear(&mut self) {
        self.ored_criteria.clear();
        self.order_by_clause = None;
        self.distinct = false;
    }

    fn render_where(&self, out: &mut SqlWriter) {
        let valid: Vec<&Criteria> = self.ored_criteria.iter().filter(|c| c.is_valid()).collect();
        if valid.is_empty() {
            return;
        }
        out.push(" WHERE ");
        for (i, group) in valid.iter().enumerate() {
            if i > 0 {
                out.push(" or ");
            }
            out.push("( ");
            for (j, criterion) in group.criteria.iter().enumerate() {
                if j > 0 {
                    out.push(" and ");
                }
                criterion.render(out);
            }
            out.push(" )");
        }
    }

    /// `SELECT [DISTINCT] columns FROM table [WHERE ..] [ORDER BY ..]`
    ///
    /// `columns` pairs each column name with the name it is read back as; the two differ
    /// only for columns renamed in generated code.
    pub fn select_statement(
        &self,
        table: &str,
        columns: &[(&str, &str)],
        dialect: Dialect,
    ) -> SqlStatement {
        let mut out = SqlWriter::new(dialect);
        out.push("SELECT ");
        if self.distinct {
            out.push("DISTINCT ");
        }
        for (i, (column, alias)) in columns.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push_identifier(column);
            if column != alias {
                out.push(" AS ");
                out.push_identifier(alias);
            }
        }
        out.push(" FROM ");
        out.push_identifier(table);
        self.render_where(&mut out);
        if let Some(order_by) = &self.order_by_clause {
            out.push(" ORDER BY ");
            out.push(order_by);
        }
        out.finish()
    }

    /// `SELECT count(*) AS count FROM table [WHERE ..]`
    pub fn count_statement(&self, table: &str, dialect: Dialect) -> SqlStatement {
        let mut out = SqlWriter::new(dialect);
        out.push("SELECT count(*) AS count FROM ");
        out.push_identifier(table);
        self.render_where(&mut out);
        out.finish()
    }

    /// `DELETE FROM table [WHERE ..]`
    pub fn delete_statement(&self, table: &str, dialect: Dialect) -> SqlStatement {
        let mut out = SqlWriter::new(dialect);
        out.push("DELETE FROM ");
        out.push_identifier(table);
        self.render_where(&mut out);
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

    #[test]
    fn test_empty_example_has_no_where() {
        let example = Example::new();
        let stmt = example.select_statement("t_coffee", COLUMNS, Dialect::Sqlite);
        assert_eq!(stmt.sql(), r#"SELECT "id", "name" FROM "t_coffee""#);
        assert!(stmt.binds().is_empty());
    }

    #[test]
    fn test_single_equality() {
        let mut example = Example::new();
        example
            .create_criteria()
            .add("name", Condition::Compare(Operator::Equal, "latte".into()));

        let stmt = example.select_statement("t_coffee", COLUMNS, Dialect::Sqlite);
        assert_eq!(
            stmt.sql(),
            r#"SELECT "id", "name" FROM "t_coffee" WHERE ( "name" = ? )"#
        );
        assert_eq!(stmt.binds(), &[Value::Text("latte".to_string())]);
    }

    #[test]
    fn test_or_groups_and_numbered_placeholders() {
        let mut example = Example::new();
        example
            .create_criteria()
            .add("name", Condition::Like("%te".to_string()))
            .add("id", Condition::Compare(Operator::GreaterThan, 1_i64.into()));
        example
            .or()
            .add("id", Condition::Between(5_i64.into(), 9_i64.into()));
        example.set_order_by_clause("id desc");
        example.set_distinct(true);

        let stmt = example.select_statement("t_coffee", COLUMNS, Dialect::Postgres);
        assert_eq!(
            stmt.sql(),
            r#"SELECT DISTINCT "id", "name" FROM "t_coffee" WHERE ( "name" like $1 and "id" > $2 ) or ( "id" between $3 and $4 ) ORDER BY id desc"#
        );
        assert_eq!(stmt.binds().len(), 4);
    }

    #[test]
    fn test_keyword_columns_are_quoted() {
        let mut example = Example::new();
        example.create_criteria().add("order", Condition::IsNotNull);
        let columns = [("id", "id"), ("order", "order"), ("type", "type_")];

        let stmt = example.select_statement("t_item", &columns, Dialect::Sqlite);
        assert_eq!(
            stmt.sql(),
            r#"SELECT "id", "order", "type" AS "type_" FROM "t_item" WHERE ( "order" is not null )"#
        );

        let stmt = example.select_statement("t_item", &columns, Dialect::Mysql);
        assert_eq!(
            stmt.sql(),
            "SELECT `id`, `order`, `type` AS `type_` FROM `t_item` WHERE ( `order` is not null )"
        );
    }

    #[test]
    fn test_escape_identifier_doubles_quotes() {
        assert_eq!(Dialect::Postgres.escape_identifier("user"), "\"user\"");
        assert_eq!(Dialect::Sqlite.escape_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::Mysql.escape_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let mut example = Example::new();
        example.create_criteria();
        example.or().add("name", Condition::IsNull);

        let stmt = example.count_statement("t_coffee", Dialect::Sqlite);
        assert_eq!(
            stmt.sql(),
            r#"SELECT count(*) AS count FROM "t_coffee" WHERE ( "name" is null )"#
        );
    }

    #[test]
    fn test_in_lists() {
        let mut example = Example::new();
        example
            .create_criteria()
            .add("id", Condition::In(vec![1_i64.into(), 2_i64.into()]))
            .add("id", Condition::NotIn(vec![]));
        example.or().add("id", Condition::In(vec![]));

        let stmt = example.delete_statement("t_coffee", Dialect::Sqlite);
        assert_eq!(
            stmt.sql(),
            r#"DELETE FROM "t_coffee" WHERE ( "id" in (?, ?) and 1 = 1 ) or ( 1 = 0 )"#
        );
    }

    #[test]
    fn test_create_criteria_reuses_first_group() {
        let mut example = Example::new();
        example.create_criteria().add("id", Condition::IsNotNull);
        example.create_criteria().add("name", Condition::IsNull);
        assert_eq!(example.ored_criteria().len(), 1);
        assert_eq!(example.ored_criteria()[0].criteria().len(), 2);

        example.clear();
        assert!(example.ored_criteria().is_empty());
        assert!(!example.is_distinct());
    }
}
