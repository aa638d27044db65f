// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{ApiResponse, Pipeline, UpsertRequest};
use crate::app_config::Config;
use crate::auth::TokenAuthenticator;
use crate::cache::MemoryListingCache;
use crate::query::{QueryEngine, SearchFilters};
use crate::store::factory::SeedRecord;
use crate::store::{StoreConnection, TranslationRepository};

mod api;
mod app_config;
mod auth;
mod cache;
mod errors;
mod export;
mod query;
mod store;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a translation record or refresh the live one for (key, locale)
    Upsert {
        /// Translation key, e.g. "welcome.title"
        key: String,

        /// Locale code, e.g. "en"
        locale: String,

        /// Translated text
        value: String,

        /// Usage context tag
        #[arg(long, default_value = "web")]
        context: String,
    },

    /// Soft-delete a record by id
    Delete {
        /// Record id
        id: i64,
    },

    /// List a locale's records, oldest first
    List {
        /// Locale code to list
        locale: String,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Search records across locales, most recently updated first
    Search {
        /// Substring to match against keys
        #[arg(long)]
        key: Option<String>,

        /// Substring to match against locale codes
        #[arg(long)]
        locale: Option<String>,

        /// Exact context tag to match
        #[arg(long)]
        context: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Export live records as a locale -> key -> value document
    Export {
        /// Restrict the export to one locale
        #[arg(long)]
        locale: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },

    /// Fill the store with random records for local development
    Seed {
        /// Number of records to generate
        #[arg(short = 'n', long, default_value_t = 50)]
        count: u32,
    },

    /// Generate shell completions for lexistore
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommands {
    /// Issue a new bearer token; the plain token is shown exactly once
    Issue {
        /// Label for the token, e.g. "ci-deploy"
        name: String,
    },

    /// Revoke a token by id
    Revoke {
        /// Token id
        id: i64,
    },
}

/// Lexistore - Localization String Store
///
/// Manages localized UI strings in a SQLite-backed store with soft deletion,
/// cached locale listings, cross-field search and bulk export, all behind a
/// token-authenticated operation pipeline.
#[derive(Parser, Debug)]
#[command(name = "lexistore")]
#[command(author = "Lexistore Team")]
#[command(version = "1.0.0")]
#[command(about = "Localization string store")]
#[command(long_about = "Lexistore keeps localized UI strings in a SQLite-backed store and exposes
them through an authenticated operation pipeline.

EXAMPLES:
    lexistore token issue ci-deploy               # Issue a bearer token (shown once)
    lexistore --token <TOKEN> upsert welcome.title en Welcome
    lexistore upsert welcome.title fr Bienvenue --context mobile
    lexistore list en --page 2                    # List a locale page by page
    lexistore search --key welcome --context web  # Search across locales
    lexistore export --locale en                  # Export locale -> key -> value
    lexistore delete 42                           # Soft-delete record 42
    lexistore seed -n 100                         # Seed random records
    lexistore completions bash > lexistore.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

AUTHENTICATION:
    Record commands (upsert, delete, list, search, export) require a bearer
    token, read from --token or the LEXISTORE_TOKEN environment variable.
    Issue and revoke tokens with the token subcommand; token management and
    seeding work directly against the local store without a token.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Bearer token for record commands
    #[arg(long, env = "LEXISTORE_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Database file path (overrides the configured one)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Fixed-width tag for log level
    fn tag_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let tag = Self::tag_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Completions need no config or store
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lexistore", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}

async fn run(options: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let config = load_or_create_config(&options)?;

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let db = open_store(&config)?;
    let repository = TranslationRepository::new(db.clone());
    let cache = Arc::new(MemoryListingCache::new());
    let engine = QueryEngine::new(repository, cache, config.cache_ttl());
    let authenticator = TokenAuthenticator::new(db);

    let token = options.token.as_deref();

    match options.command {
        Commands::Upsert {
            key,
            locale,
            value,
            context,
        } => {
            let pipeline = Pipeline::new(authenticator, engine);
            let request = UpsertRequest::new(&key, &locale, &value, &context);
            print_response(pipeline.upsert(token, request).await)
        }

        Commands::Delete { id } => {
            let pipeline = Pipeline::new(authenticator, engine);
            print_response(pipeline.delete(token, id).await)
        }

        Commands::List { locale, page } => {
            let pipeline = Pipeline::new(authenticator, engine);
            print_response(pipeline.list(token, &locale, page).await)
        }

        Commands::Search {
            key,
            locale,
            context,
            page,
        } => {
            let pipeline = Pipeline::new(authenticator, engine);
            let filters = SearchFilters {
                key,
                locale,
                context,
            };
            print_response(pipeline.search(token, filters, page).await)
        }

        Commands::Export { locale, page } => {
            let pipeline = Pipeline::new(authenticator, engine);
            print_response(pipeline.export(token, locale.as_deref(), page).await)
        }

        Commands::Token { action } => match action {
            TokenCommands::Issue { name } => {
                let issued = authenticator.issue(&name).await?;

                warn!("Store this token now; it cannot be shown again");
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "id": issued.id,
                        "name": issued.name,
                        "token": issued.plain_token,
                    }))?
                );
                Ok(())
            }
            TokenCommands::Revoke { id } => {
                if authenticator.revoke(id).await? {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "message": "Revoked" }))?
                    );
                    Ok(())
                } else {
                    Err(anyhow!("No API token with id {}", id))
                }
            }
        },

        Commands::Seed { count } => {
            let mut rng = rand::rng();
            for _ in 0..count {
                let record = SeedRecord::random(&mut rng);
                engine
                    .upsert(&record.key, &record.locale, &record.value, &record.context)
                    .await?;
            }

            info!("Seeded {} random translation records", count);
            Ok(())
        }

        // Handled in main before config load
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the configuration, creating a default file when none exists, and
/// apply command-line overrides
fn load_or_create_config(options: &CommandLineOptions) -> Result<Config> {
    let config_path = &options.config_path;

    let mut config: Config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(database) = &options.database {
        config.database_path = Some(database.clone());
    }

    Ok(config)
}

/// Open the store at the configured location, falling back to the per-user
/// default path
fn open_store(config: &Config) -> Result<StoreConnection> {
    match &config.database_path {
        Some(path) => StoreConnection::new(path),
        None => StoreConnection::new_default(),
    }
}

/// Print the response body to stdout and map failure statuses to a
/// process-level error
fn print_response(response: ApiResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if response.is_success() {
        Ok(())
    } else {
        Err(anyhow!("Request failed with status {}", response.status))
    }
}
