// @generated by mapgen. Do not edit.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::runtime::money::Money;
use crate::schema::t_coffee;

/// Model for table `t_coffee`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: Option<i64>,
    /// Display name
    pub name: Option<String>,
    /// Price in minor units
    pub price: Option<Money>,
    pub create_time: Option<NaiveDateTime>,
    pub update_time: Option<NaiveDateTime>,
}

impl Coffee {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_create_time(mut self, create_time: NaiveDateTime) -> Self {
        self.create_time = Some(create_time);
        self
    }

    pub fn with_update_time(mut self, update_time: NaiveDateTime) -> Self {
        self.update_time = Some(update_time);
        self
    }
}

/// Row of `t_coffee` as stored.
#[derive(Debug, Clone, Queryable, QueryableByName)]
#[diesel(table_name = t_coffee)]
pub struct CoffeeRecord {
    pub id: i64,
    pub name: Option<String>,
    pub price: Money,
    pub create_time: Option<NaiveDateTime>,
    pub update_time: Option<NaiveDateTime>,
}

impl From<CoffeeRecord> for Coffee {
    fn from(record: CoffeeRecord) -> Self {
        Coffee {
            id: Some(record.id),
            name: record.name,
            price: Some(record.price),
            create_time: record.create_time,
            update_time: record.update_time,
        }
    }
}

/// Column values of a [`Coffee`] for INSERT and UPDATE; unset fields are left out.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = t_coffee, primary_key(id))]
pub struct CoffeeValues<'a> {
    pub name: Option<&'a str>,
    pub price: Option<&'a Money>,
    pub create_time: Option<&'a NaiveDateTime>,
    pub update_time: Option<&'a NaiveDateTime>,
}

impl<'a> From<&'a Coffee> for CoffeeValues<'a> {
    fn from(model: &'a Coffee) -> Self {
        CoffeeValues {
            name: model.name.as_deref(),
            price: model.price.as_ref(),
            create_time: model.create_time.as_ref(),
            update_time: model.update_time.as_ref(),
        }
    }
}
