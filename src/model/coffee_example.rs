// @generated by mapgen. Do not edit.

use chrono::NaiveDateTime;

use crate::runtime::criteria::{Condition, Criteria, Example, Operator, Value};
use crate::runtime::money::Money;

/// Criteria for `t_coffee` queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeExample {
    example: Example,
}

impl CoffeeExample {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first criteria group; further groups come from [`CoffeeExample::or`].
    pub fn create_criteria(&mut self) -> CoffeeCriteria<'_> {
        CoffeeCriteria {
            criteria: self.example.create_criteria(),
        }
    }

    pub fn or(&mut self) -> CoffeeCriteria<'_> {
        CoffeeCriteria {
            criteria: self.example.or(),
        }
    }

    pub fn set_order_by_clause(&mut self, clause: impl Into<String>) {
        self.example.set_order_by_clause(clause);
    }

    pub fn set_distinct(&mut self, distinct: bool) {
        self.example.set_distinct(distinct);
    }

    pub fn clear(&mut self) {
        self.example.clear();
    }

    pub fn as_example(&self) -> &Example {
        &self.example
    }
}

/// AND-ed predicates on `t_coffee` columns.
pub struct CoffeeCriteria<'a> {
    criteria: &'a mut Criteria,
}

impl<'a> CoffeeCriteria<'a> {
    fn add(self, column: &'static str, condition: Condition) -> Self {
        self.criteria.add(column, condition);
        self
    }

    pub fn and_id_is_null(self) -> Self {
        self.add("id", Condition::IsNull)
    }

    pub fn and_id_is_not_null(self) -> Self {
        self.add("id", Condition::IsNotNull)
    }

    pub fn and_id_equal_to(self, value: i64) -> Self {
        self.add("id", Condition::Compare(Operator::Equal, Value::from(value)))
    }

    pub fn and_id_not_equal_to(self, value: i64) -> Self {
        self.add("id", Condition::Compare(Operator::NotEqual, Value::from(value)))
    }

    pub fn and_id_greater_than(self, value: i64) -> Self {
        self.add("id", Condition::Compare(Operator::GreaterThan, Value::from(value)))
    }

    pub fn and_id_greater_than_or_equal_to(self, value: i64) -> Self {
        self.add("id", Condition::Compare(Operator::GreaterThanOrEqual, Value::from(value)))
    }

    pub fn and_id_less_than(self, value: i64) -> Self {
        self.add("id", Condition::Compare(Operator::LessThan, Value::from(value)))
    }

    pub fn and_id_less_than_or_equal_to(self, value: i64) -> Self {
        self.add("id", Condition::Compare(Operator::LessThanOrEqual, Value::from(value)))
    }

    pub fn and_id_in(self, values: impl IntoIterator<Item = i64>) -> Self {
        self.add("id", Condition::In(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_id_not_in(self, values: impl IntoIterator<Item = i64>) -> Self {
        self.add("id", Condition::NotIn(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_id_between(self, low: i64, high: i64) -> Self {
        self.add("id", Condition::Between(Value::from(low), Value::from(high)))
    }

    pub fn and_id_not_between(self, low: i64, high: i64) -> Self {
        self.add("id", Condition::NotBetween(Value::from(low), Value::from(high)))
    }

    pub fn and_name_is_null(self) -> Self {
        self.add("name", Condition::IsNull)
    }

    pub fn and_name_is_not_null(self) -> Self {
        self.add("name", Condition::IsNotNull)
    }

    pub fn and_name_equal_to(self, value: impl Into<String>) -> Self {
        self.add("name", Condition::Compare(Operator::Equal, Value::Text(value.into())))
    }

    pub fn and_name_not_equal_to(self, value: impl Into<String>) -> Self {
        self.add("name", Condition::Compare(Operator::NotEqual, Value::Text(value.into())))
    }

    pub fn and_name_greater_than(self, value: impl Into<String>) -> Self {
        self.add("name", Condition::Compare(Operator::GreaterThan, Value::Text(value.into())))
    }

    pub fn and_name_greater_than_or_equal_to(self, value: impl Into<String>) -> Self {
        self.add("name", Condition::Compare(Operator::GreaterThanOrEqual, Value::Text(value.into())))
    }

    pub fn and_name_less_than(self, value: impl Into<String>) -> Self {
        self.add("name", Condition::Compare(Operator::LessThan, Value::Text(value.into())))
    }

    pub fn and_name_less_than_or_equal_to(self, value: impl Into<String>) -> Self {
        self.add("name", Condition::Compare(Operator::LessThanOrEqual, Value::Text(value.into())))
    }

    pub fn and_name_like(self, pattern: impl Into<String>) -> Self {
        self.add("name", Condition::Like(pattern.into()))
    }

    pub fn and_name_not_like(self, pattern: impl Into<String>) -> Self {
        self.add("name", Condition::NotLike(pattern.into()))
    }

    pub fn and_name_in<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add("name", Condition::In(values.into_iter().map(|v| Value::Text(v.into())).collect()))
    }

    pub fn and_name_not_in<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add("name", Condition::NotIn(values.into_iter().map(|v| Value::Text(v.into())).collect()))
    }

    pub fn and_name_between(self, low: impl Into<String>, high: impl Into<String>) -> Self {
        self.add("name", Condition::Between(Value::Text(low.into()), Value::Text(high.into())))
    }

    pub fn and_name_not_between(self, low: impl Into<String>, high: impl Into<String>) -> Self {
        self.add("name", Condition::NotBetween(Value::Text(low.into()), Value::Text(high.into())))
    }

    pub fn and_price_is_null(self) -> Self {
        self.add("price", Condition::IsNull)
    }

    pub fn and_price_is_not_null(self) -> Self {
        self.add("price", Condition::IsNotNull)
    }

    pub fn and_price_equal_to(self, value: Money) -> Self {
        self.add("price", Condition::Compare(Operator::Equal, Value::from(value)))
    }

    pub fn and_price_not_equal_to(self, value: Money) -> Self {
        self.add("price", Condition::Compare(Operator::NotEqual, Value::from(value)))
    }

    pub fn and_price_greater_than(self, value: Money) -> Self {
        self.add("price", Condition::Compare(Operator::GreaterThan, Value::from(value)))
    }

    pub fn and_price_greater_than_or_equal_to(self, value: Money) -> Self {
        self.add("price", Condition::Compare(Operator::GreaterThanOrEqual, Value::from(value)))
    }

    pub fn and_price_less_than(self, value: Money) -> Self {
        self.add("price", Condition::Compare(Operator::LessThan, Value::from(value)))
    }

    pub fn and_price_less_than_or_equal_to(self, value: Money) -> Self {
        self.add("price", Condition::Compare(Operator::LessThanOrEqual, Value::from(value)))
    }

    pub fn and_price_in(self, values: impl IntoIterator<Item = Money>) -> Self {
        self.add("price", Condition::In(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_price_not_in(self, values: impl IntoIterator<Item = Money>) -> Self {
        self.add("price", Condition::NotIn(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_price_between(self, low: Money, high: Money) -> Self {
        self.add("price", Condition::Between(Value::from(low), Value::from(high)))
    }

    pub fn and_price_not_between(self, low: Money, high: Money) -> Self {
        self.add("price", Condition::NotBetween(Value::from(low), Value::from(high)))
    }

    pub fn and_create_time_is_null(self) -> Self {
        self.add("create_time", Condition::IsNull)
    }

    pub fn and_create_time_is_not_null(self) -> Self {
        self.add("create_time", Condition::IsNotNull)
    }

    pub fn and_create_time_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Compare(Operator::Equal, Value::from(value)))
    }

    pub fn and_create_time_not_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Compare(Operator::NotEqual, Value::from(value)))
    }

    pub fn and_create_time_greater_than(self, value: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Compare(Operator::GreaterThan, Value::from(value)))
    }

    pub fn and_create_time_greater_than_or_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Compare(Operator::GreaterThanOrEqual, Value::from(value)))
    }

    pub fn and_create_time_less_than(self, value: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Compare(Operator::LessThan, Value::from(value)))
    }

    pub fn and_create_time_less_than_or_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Compare(Operator::LessThanOrEqual, Value::from(value)))
    }

    pub fn and_create_time_in(self, values: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.add("create_time", Condition::In(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_create_time_not_in(self, values: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.add("create_time", Condition::NotIn(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_create_time_between(self, low: NaiveDateTime, high: NaiveDateTime) -> Self {
        self.add("create_time", Condition::Between(Value::from(low), Value::from(high)))
    }

    pub fn and_create_time_not_between(self, low: NaiveDateTime, high: NaiveDateTime) -> Self {
        self.add("create_time", Condition::NotBetween(Value::from(low), Value::from(high)))
    }

    pub fn and_update_time_is_null(self) -> Self {
        self.add("update_time", Condition::IsNull)
    }

    pub fn and_update_time_is_not_null(self) -> Self {
        self.add("update_time", Condition::IsNotNull)
    }

    pub fn and_update_time_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Compare(Operator::Equal, Value::from(value)))
    }

    pub fn and_update_time_not_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Compare(Operator::NotEqual, Value::from(value)))
    }

    pub fn and_update_time_greater_than(self, value: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Compare(Operator::GreaterThan, Value::from(value)))
    }

    pub fn and_update_time_greater_than_or_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Compare(Operator::GreaterThanOrEqual, Value::from(value)))
    }

    pub fn and_update_time_less_than(self, value: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Compare(Operator::LessThan, Value::from(value)))
    }

    pub fn and_update_time_less_than_or_equal_to(self, value: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Compare(Operator::LessThanOrEqual, Value::from(value)))
    }

    pub fn and_update_time_in(self, values: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.add("update_time", Condition::In(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_update_time_not_in(self, values: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        self.add("update_time", Condition::NotIn(values.into_iter().map(Value::from).collect()))
    }

    pub fn and_update_time_between(self, low: NaiveDateTime, high: NaiveDateTime) -> Self {
        self.add("update_time", Condition::Between(Value::from(low), Value::from(high)))
    }

    pub fn and_update_time_not_between(self, low: NaiveDateTime, high: NaiveDateTime) -> Self {
        self.add("update_time", Condition::NotBetween(Value::from(low), Value::from(high)))
    }
}
