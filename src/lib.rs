//! # mapgen: XML-driven table mappers on Diesel
//!
//! mapgen reads a generator configuration describing database tables and emits, per
//! table, a Diesel `table!` schema, a model struct, an example (criteria) builder and a
//! mapper with the usual CRUD statements.
//!
//! ## Example: generator configuration
//!
//! ```xml
//! <generatorConfiguration>
//!   <context id="coffee" runtimePath="crate::runtime">
//!     <schemaGenerator targetFile="src/schema.rs" modulePath="crate::schema"/>
//!     <modelGenerator targetProject="src/model" modulePath="crate::model"/>
//!     <mapperGenerator targetProject="src/mapper"/>
//!     <table tableName="t_coffee">
//!       <domainObjectRenamingRule searchString="^t_" replaceString=""/>
//!       <generatedKey column="id"/>
//!       <column name="id" type="BIGINT" nullable="false" primaryKey="true"/>
//!       <column name="name" type="VARCHAR" length="255"/>
//!       <column name="price" type="BIGINT" nullable="false"/>
//!       <columnOverride column="price" typeHandler="money"/>
//!     </table>
//!   </context>
//! </generatorConfiguration>
//! ```
//!
//! ## Example: querying by example
//!
//! ```rust,no_run
//! use mapgen::model::CoffeeExample;
//! use mapgen::runtime::Database;
//! use mapgen::mapper::CoffeeMapper;
//!
//! let database = Database::new(":memory:").unwrap();
//! database.init_schema().unwrap();
//! let mapper = CoffeeMapper::new(database.pool().clone());
//!
//! let mut example = CoffeeExample::new();
//! example.create_criteria().and_name_equal_to("latte");
//! let lattes = mapper.select_by_example(&example).unwrap();
//! ```

// Code generation framework
pub mod codegen;

// Runtime support for generated code
pub mod runtime;

// Generated from resources/generatorConfig.xml
pub mod schema;
pub mod model;
pub mod mapper;

pub mod app;

// Re-export key types
pub use codegen::{ConfigurationParser, GenerationReport, Generator, ShellCallback};
pub use runtime::{Database, DatabaseConfig, Example, MapperError, Money};
