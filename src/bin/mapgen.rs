//! mapgen CLI - generate Diesel table mappers from an XML configuration and run them.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use mapgen::app::{AppConfig, Application, DEFAULT_GENERATOR_CONFIG};

#[derive(Parser)]
#[command(name = "mapgen")]
#[command(version, about = "XML-driven Diesel mapper generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate schema, model, example and mapper sources
    Generate {
        /// Path to the generator configuration
        #[arg(short, long, default_value = DEFAULT_GENERATOR_CONFIG)]
        config: PathBuf,

        /// Replace existing files instead of writing numbered copies
        #[arg(long)]
        overwrite: bool,

        /// Directory that target paths are resolved against
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,
    },

    /// Validate the generator configuration without writing anything
    Validate {
        /// Path to the generator configuration
        #[arg(short, long, default_value = DEFAULT_GENERATOR_CONFIG)]
        config: PathBuf,
    },

    /// Insert and query a few coffees through the generated mapper
    Run {
        /// Database URL (overrides DATABASE_URL and the configured connection)
        #[arg(short, long)]
        database_url: Option<String>,

        /// Regenerate sources before running
        #[arg(short, long)]
        generate: bool,

        /// Path to the generator configuration (overrides MAPGEN_GENERATOR_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip creating the schema
        #[arg(long)]
        no_init_schema: bool,
    },
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, overwrite, base_dir } => {
            generate(config, overwrite, base_dir)
        }
        Commands::Validate { config } => validate(config),
        Commands::Run { database_url, generate, config, no_init_schema } => {
            run(database_url, generate, config, no_init_schema)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn generate(config: PathBuf, overwrite: bool, base_dir: PathBuf) -> Result<(), String> {
    println!("🔧 Generating mappers from {}...", config.display());

    let mut warnings = Vec::new();
    let report = mapgen::codegen::generate_from_xml(&config, &base_dir, overwrite, &mut warnings)?;

    for file in &report.files {
        println!("  ✓ Generated {}", file.display());
    }
    for warning in &warnings {
        println!("  ⚠ {}", warning);
    }
    println!("✨ Code generation completed with {} warnings", report.warning_count);
    Ok(())
}

fn validate(config: PathBuf) -> Result<(), String> {
    println!("🔍 Validating {}...", config.display());

    let mut warnings = Vec::new();
    let tables = mapgen::codegen::validate_xml(&config, &mut warnings)?;

    println!("  ✓ {} tables validated", tables);
    for warning in &warnings {
        println!("  ⚠ {}", warning);
    }
    println!("✅ Configuration is valid!");
    Ok(())
}

/// Settings precedence: CLI > environment > `<connection url>` > defaults
fn run(
    database_url: Option<String>,
    generate: bool,
    config: Option<PathBuf>,
    no_init_schema: bool,
) -> Result<(), String> {
    let mut app_config = AppConfig::from_env()?;
    if let Some(url) = database_url {
        app_config.database_url = Some(url);
    }
    if let Some(path) = config {
        app_config.generator_config = path;
    }
    if no_init_schema {
        app_config.init_schema = false;
    }
    app_config.generate_on_start = generate;

    let app = Application::bootstrap(app_config)
        .map_err(|e| format!("Failed to start: {}", e))?;
    let coffees = app.run().map_err(|e| format!("Run failed: {}", e))?;

    println!("✨ Found {} coffees named latte", coffees.len());
    Ok(())
}
