//! Generated mappers.

pub mod coffee_mapper;

pub use coffee_mapper::CoffeeMapper;
