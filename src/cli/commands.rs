//! CLI command implementations
//!
//! Every command except `init` requires an existing database. Async
//! services run on a runtime built per command.

use std::path::Path;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::auth::{AuthService, PasswordPolicy};
use crate::http_server::{AppState, HttpServer};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::store::{Database, StoreError};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;
use super::seed;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Seed { config } => seed_database(&config),
        Command::CreateAdmin {
            config,
            name,
            phone,
            password,
        } => create_admin(&config, &name, &phone, &password),
        Command::SetActive {
            config,
            phone,
            active,
        } => set_active(&config, &phone, active),
    }
}

/// Write a default config if none exists, then create the database
pub fn init(config_path: &Path) -> CliResult<()> {
    if !config_path.exists() {
        Config::default().save(config_path)?;
    }
    let config = load_config(config_path)?;

    if config.database_path().exists() {
        return Err(CliError::already_initialized(&config.database_path));
    }

    let db = Database::open(config.database_path())?;
    log_event_with_fields(
        Event::DatabaseReady,
        &[("database_path", config.database_path.as_str())],
    );

    let counts = runtime()?.block_on(db.counts())?;
    write_response(&json!({
        "config": config_path.display().to_string(),
        "database_path": config.database_path,
        "counts": counts,
    }))
}

/// Start the HTTP server and block until it stops
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }

    let db = open_database(&config)?;
    let server = HttpServer::new(config.server.clone(), AppState::new(db));

    runtime()?.block_on(async {
        server.start().await.map_err(|e| {
            let message = format!("HTTP server failed: {}", e);
            log_event_with_fields(Event::BootFailed, &[("error", message.as_str())]);
            CliError::boot_failed(message)
        })
    })
}

/// Insert sample data in one transaction
pub fn seed_database(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let db = open_database(&config)?;

    let report = runtime()?.block_on(async {
        let mut conn = db.connection().await;
        let tx = conn.transaction().map_err(StoreError::from)?;
        let report = seed::seed(&tx, &mut rand::thread_rng())?;
        tx.commit().map_err(StoreError::from)?;
        Ok::<_, CliError>(report)
    })?;

    log_event_with_fields(
        Event::SeedComplete,
        &[
            ("places", report.places.to_string().as_str()),
            ("reviews", report.reviews.to_string().as_str()),
            ("users", report.users.to_string().as_str()),
        ],
    );

    write_response(&report)
}

/// Create a staff superuser with a hashed password
pub fn create_admin(config_path: &Path, name: &str, phone: &str, password: &str) -> CliResult<()> {
    let config = load_config(config_path)?;
    let auth = AuthService::new(open_database(&config)?, PasswordPolicy::default());

    let user = runtime()?.block_on(auth.create_admin(name, phone, password))?;
    write_response(&user)
}

/// Activate or deactivate the account registered to `phone`
pub fn set_active(config_path: &Path, phone: &str, active: bool) -> CliResult<()> {
    let config = load_config(config_path)?;
    let auth = AuthService::new(open_database(&config)?, PasswordPolicy::default());

    let user = runtime()?.block_on(auth.set_active(phone, active))?;
    write_response(&user)
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    log_event(Event::BootStart);

    let config = Config::load(config_path).map_err(|e| {
        log_event_with_fields(Event::BootFailed, &[("error", e.message())]);
        e
    })?;
    Logger::set_min_severity(config.severity()?);

    log_event_with_fields(
        Event::ConfigLoaded,
        &[("config", config_path.display().to_string().as_str())],
    );
    Ok(config)
}

fn open_database(config: &Config) -> CliResult<Database> {
    if !config.database_path().exists() {
        return Err(CliError::not_initialized(&config.database_path));
    }

    let db = Database::open(config.database_path())?;
    log_event_with_fields(
        Event::DatabaseReady,
        &[("database_path", config.database_path.as_str())],
    );
    Ok(db)
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}
