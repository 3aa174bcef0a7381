//! Application bootstrap
//!
//! Builds the connection pool, optionally regenerates the mapper sources and then
//! exercises the generated `CoffeeMapper` once.

use chrono::Utc;
use std::path::PathBuf;

use crate::codegen::{self, GenerationReport};
use crate::mapper::CoffeeMapper;
use crate::model::{Coffee, CoffeeExample};
use crate::runtime::database::{Database, DatabaseConfig, IN_MEMORY_URL};
use crate::runtime::money::{CurrencyUnit, Money};

pub const DEFAULT_GENERATOR_CONFIG: &str = "resources/generatorConfig.xml";

/// Runtime settings, resolved from defaults, then the environment, then CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Explicit URL from `DATABASE_URL` or the CLI. When unset the generator
    /// configuration's `<connection url>` is used, then `:memory:`.
    pub database_url: Option<String>,
    pub generator_config: PathBuf,
    /// Run the generator before touching the database.
    pub generate_on_start: bool,
    pub overwrite: bool,
    pub init_schema: bool,
    pub database: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: None,
            generator_config: PathBuf::from(DEFAULT_GENERATOR_CONFIG),
            generate_on_start: false,
            overwrite: true,
            init_schema: true,
            database: DatabaseConfig::default(),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        let v = v.trim().to_ascii_lowercase();
        matches!(v.as_str(), "1" | "true" | "yes" | "on")
    })
}

impl AppConfig {
    /// Defaults overridden by `DATABASE_URL`, `MAPGEN_GENERATOR_CONFIG`,
    /// `MAPGEN_MAX_CONNECTIONS` and `MAPGEN_INIT_SCHEMA`.
    pub fn from_env() -> Result<Self, String> {
        let mut config = AppConfig::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                config.database_url = Some(url);
            }
        }
        if let Ok(path) = std::env::var("MAPGEN_GENERATOR_CONFIG") {
            config.generator_config = PathBuf::from(path);
        }
        if let Ok(max) = std::env::var("MAPGEN_MAX_CONNECTIONS") {
            config.database.max_connections = max
                .trim()
                .parse()
                .map_err(|_| format!("Invalid MAPGEN_MAX_CONNECTIONS: '{}'", max))?;
            if config.database.max_connections == 0 {
                return Err("MAPGEN_MAX_CONNECTIONS must be at least 1".to_string());
            }
            config.database.min_idle = config.database.min_idle.min(config.database.max_connections);
        }
        if let Some(init) = env_flag("MAPGEN_INIT_SCHEMA") {
            config.init_schema = init;
        }

        Ok(config)
    }

    /// Explicit URL, else the first context's `<connection url>`, else `:memory:`.
    pub fn resolve_database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        let mut warnings = Vec::new();
        match codegen::connection_url(&self.generator_config, &mut warnings) {
            Ok(Some(url)) => url,
            Ok(None) => IN_MEMORY_URL.to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "No connection URL from generator configuration");
                IN_MEMORY_URL.to_string()
            }
        }
    }
}

/// A bootstrapped application: configuration plus a live connection pool.
pub struct Application {
    config: AppConfig,
    database: Database,
}

impl Application {
    pub fn bootstrap(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let database_url = config.resolve_database_url();
        tracing::info!(database_url = %database_url, "Starting application");

        let database = Database::new_with_config(&database_url, config.database.clone())?;
        database.test_connection()?;
        if config.init_schema {
            database.init_schema()?;
        }

        Ok(Application { config, database })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn coffee_mapper(&self) -> CoffeeMapper {
        CoffeeMapper::new(self.database.pool().clone())
    }

    /// Run once: generate if asked, then exercise the mapper.
    pub fn run(&self) -> Result<Vec<Coffee>, Box<dyn std::error::Error>> {
        if self.config.generate_on_start {
            generate_artifacts(&self.config.generator_config, self.config.overwrite)?;
        }
        let found = play_with_artifacts(&self.coffee_mapper())?;
        Ok(found)
    }
}

/// Run the generator against the current directory, logging every warning.
pub fn generate_artifacts(config_path: &std::path::Path, overwrite: bool) -> Result<GenerationReport, String> {
    tracing::info!(config = %config_path.display(), "Starting generator");
    let mut warnings = Vec::new();
    codegen::generate_from_xml(config_path, ".", overwrite, &mut warnings)
}

/// Insert two coffees, read the first back by key and look up lattes by name.
///
/// Returns the rows matched by the name lookup.
pub fn play_with_artifacts(mapper: &CoffeeMapper) -> Result<Vec<Coffee>, Box<dyn std::error::Error>> {
    let twd = CurrencyUnit::of("TWD")?;

    let now = Utc::now().naive_utc();
    let mut espresso = Coffee::new()
        .with_name("espresso")
        .with_price(Money::of(twd, 100.0)?)
        .with_create_time(now)
        .with_update_time(now);
    mapper.insert(&mut espresso)?;

    let now = Utc::now().naive_utc();
    let mut latte = Coffee::new()
        .with_name("latte")
        .with_price(Money::of(twd, 150.0)?)
        .with_create_time(now)
        .with_update_time(now);
    mapper.insert(&mut latte)?;

    let first_id = espresso.id.unwrap_or(1);
    match mapper.select_by_primary_key(first_id)? {
        Some(coffee) => tracing::info!("Coffee {:?}", coffee),
        None => tracing::info!(id = first_id, "Coffee not found"),
    }

    let mut example = CoffeeExample::new();
    example.create_criteria().and_name_equal_to("latte");
    let list = mapper.select_by_example(&example)?;
    for coffee in &list {
        tracing::info!("selectByExample: {:?}", coffee);
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, connection: &str) -> PathBuf {
        let xml = format!(
            r#"<generatorConfiguration>
                <context id="coffee">
                    {}
                    <schemaGenerator targetFile="src/schema.rs"/>
                    <modelGenerator targetProject="src/model"/>
                    <mapperGenerator targetProject="src/mapper"/>
                    <table tableName="t_coffee">
                        <column name="id" type="BIGINT" primaryKey="true"/>
                    </table>
                </context>
            </generatorConfiguration>"#,
            connection
        );
        let path = dir.path().join("generatorConfig.xml");
        fs::write(&path, xml).unwrap();
        path
    }

    #[test]
    fn test_default_config_uses_in_memory_database() {
        let config = AppConfig::default();
        assert_eq!(config.database_url, None);
        assert_eq!(config.resolve_database_url(), ":memory:");
        assert_eq!(config.generator_config, PathBuf::from("resources/generatorConfig.xml"));
        assert!(config.init_schema);
        assert!(!config.generate_on_start);
    }

    #[test]
    fn test_database_url_precedence() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig {
            generator_config: write_config(&dir, r#"<connection url="coffee.db"/>"#),
            ..AppConfig::default()
        };
        assert_eq!(config.resolve_database_url(), "coffee.db");

        config.database_url = Some("explicit.db".to_string());
        assert_eq!(config.resolve_database_url(), "explicit.db");
    }

    #[test]
    fn test_database_url_falls_back_to_memory() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            generator_config: write_config(&dir, ""),
            ..AppConfig::default()
        };
        assert_eq!(config.resolve_database_url(), ":memory:");

        let config = AppConfig {
            generator_config: dir.path().join("missing.xml"),
            ..AppConfig::default()
        };
        assert_eq!(config.resolve_database_url(), ":memory:");
    }
}
