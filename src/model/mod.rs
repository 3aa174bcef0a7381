//! Generated models and their example (criteria) types.

pub mod coffee;
pub mod coffee_example;

pub use coffee::{Coffee, CoffeeRecord, CoffeeValues};
pub use coffee_example::{CoffeeCriteria, CoffeeExample};
