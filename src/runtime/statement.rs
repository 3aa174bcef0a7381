//! Rendered SQL with its bind parameters, executed through Diesel's boxed `sql_query`.

use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Date, Double, Float, Integer, SmallInt, Text, Timestamp};

use crate::runtime::criteria::Value;
use crate::runtime::database::{DbBackend, DbConnection};

#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    sql: String,
    binds: Vec<Value>,
}

/// Result row of a `count(*) AS count` statement.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl SqlStatement {
    pub fn new(sql: String, binds: Vec<Value>) -> Self {
        SqlStatement { sql, binds }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Value] {
        &self.binds
    }

    fn into_query(self) -> BoxedSqlQuery<'static, DbBackend, SqlQuery> {
        let mut query = diesel::sql_query(self.sql).into_boxed::<DbBackend>();
        for value in self.binds {
            query = match value {
                Value::BigInt(v) => query.bind::<BigInt, _>(v),
                Value::Integer(v) => query.bind::<Integer, _>(v),
                Value::SmallInt(v) => query.bind::<SmallInt, _>(v),
                Value::Text(v) => query.bind::<Text, _>(v),
                Value::Bool(v) => query.bind::<Bool, _>(v),
                Value::Double(v) => query.bind::<Double, _>(v),
                Value::Float(v) => query.bind::<Float, _>(v),
                Value::Timestamp(v) => query.bind::<Timestamp, _>(v),
                Value::Date(v) => query.bind::<Date, _>(v),
            };
        }
        query
    }

    /// Run a query and map every row by column name.
    pub fn load<T>(self, conn: &mut DbConnection) -> QueryResult<Vec<T>>
    where
        T: QueryableByName<DbBackend> + 'static,
    {
        tracing::debug!(sql = %self.sql, binds = self.binds.len(), "load");
        self.into_query().load::<T>(conn)
    }

    /// Run a `count(*) AS count` query.
    pub fn count(self, conn: &mut DbConnection) -> QueryResult<i64> {
        let rows = self.load::<CountRow>(conn)?;
        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }

    /// Run a statement and return the number of affected rows.
    pub fn execute(self, conn: &mut DbConnection) -> QueryResult<usize> {
        tracing::debug!(sql = %self.sql, binds = self.binds.len(), "execute");
        self.into_query().execute(conn)
    }
}
