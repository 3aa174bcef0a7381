// @generated by mapgen. Do not edit.

use diesel::prelude::*;

use crate::model::coffee::{Coffee, CoffeeRecord, CoffeeValues};
use crate::model::coffee_example::CoffeeExample;
use crate::runtime::criteria::Dialect;
use crate::runtime::database::Pool;
use crate::runtime::error::MapperError;
use crate::schema::t_coffee;

const TABLE: &str = "t_coffee";
const COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("price", "price"),
    ("create_time", "create_time"),
    ("update_time", "update_time"),
];

/// Statements for table `t_coffee`.
#[derive(Clone)]
pub struct CoffeeMapper {
    pool: Pool,
}

impl CoffeeMapper {
    pub fn new(pool: Pool) -> Self {
        CoffeeMapper { pool }
    }

    /// Insert a record. The generated `id` is written back into `record`.
    pub fn insert(&self, record: &mut Coffee) -> Result<usize, MapperError> {
        let mut conn = self.pool.get()?;
        let values = CoffeeValues::from(&*record);
        #[cfg(not(all(feature = "mysql", not(feature = "postgres"))))]
        let key = diesel::insert_into(t_coffee::table)
            .values(&values)
            .returning(t_coffee::id)
            .get_result::<i64>(&mut conn)?;
        #[cfg(all(feature = "mysql", not(feature = "postgres")))]
        let key = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(t_coffee::table)
                .values(&values)
                .execute(conn)?;
            crate::runtime::database::last_insert_id::<i64>(conn)
        })?;
        record.id = Some(key);
        Ok(1)
    }

    pub fn select_by_primary_key(&self, id: i64) -> Result<Option<Coffee>, MapperError> {
        let mut conn = self.pool.get()?;
        let record = t_coffee::table
            .find(id)
            .first::<CoffeeRecord>(&mut conn)
            .optional()?;
        Ok(record.map(Coffee::from))
    }

    pub fn select_by_example(&self, example: &CoffeeExample) -> Result<Vec<Coffee>, MapperError> {
        let mut conn = self.pool.get()?;
        let records = example
            .as_example()
            .select_statement(TABLE, COLUMNS, Dialect::current())
            .load::<CoffeeRecord>(&mut conn)?;
        Ok(records.into_iter().map(Coffee::from).collect())
    }

    pub fn count_by_example(&self, example: &CoffeeExample) -> Result<i64, MapperError> {
        let mut conn = self.pool.get()?;
        let count = example
            .as_example()
            .count_statement(TABLE, Dialect::current())
            .count(&mut conn)?;
        Ok(count)
    }

    pub fn delete_by_primary_key(&self, id: i64) -> Result<usize, MapperError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::delete(t_coffee::table.find(id)).execute(&mut conn)?;
        Ok(rows)
    }

    pub fn delete_by_example(&self, example: &CoffeeExample) -> Result<usize, MapperError> {
        let mut conn = self.pool.get()?;
        let rows = example
            .as_example()
            .delete_statement(TABLE, Dialect::current())
            .execute(&mut conn)?;
        Ok(rows)
    }

    /// Update the fields of `record` that are set, matching on its `id`.
    pub fn update_by_primary_key_selective(&self, record: &Coffee) -> Result<usize, MapperError> {
        let key = record.id.ok_or(MapperError::MissingPrimaryKey(TABLE))?;
        let mut conn = self.pool.get()?;
        let rows = diesel::update(t_coffee::table.find(key))
            .set(&CoffeeValues::from(record))
            .execute(&mut conn)?;
        Ok(rows)
    }
}
