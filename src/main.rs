//! Accounts Service CLI
//!
//! ```sh
//! # Run with default config (~/.config/accounts-service/config.toml)
//! accounts-service
//!
//! # Custom config path and port
//! accounts-service --config /etc/accounts-service/config.toml --port 8080
//!
//! # Block until the database accepts connections (container entrypoints)
//! accounts-service wait-for-db
//!
//! # Create a superuser
//! accounts-service create-superuser --email admin@example.com --password changeme
//!
//! # Validate config without starting
//! accounts-service --check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use accounts::application::UserFields;
use accounts::config::AppConfig;
use accounts::infrastructure::database::migrator::Migrator;
use accounts::infrastructure::wait_for_database;
use accounts::server::{build_user_service, init_tracing, ServerHandle, ServerOptions};

/// Accounts service: user registration, token authentication and profiles.
#[derive(Parser, Debug)]
#[command(
    name = "accounts-service",
    version,
    about = "User account service with token authentication",
    long_about = "REST API for registering users, issuing bearer tokens \
                  and managing the caller's own profile.\n\n\
                  Default config: ~/.config/accounts-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ACCOUNTS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the configured admin user.
    #[arg(long)]
    no_admin: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Wait until the database accepts connections, then exit.
    WaitForDb,
    /// Create a user with staff and superuser rights.
    CreateSuperuser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(accounts::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            apply_cli_overrides(&mut cfg, &cli);
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            return run(cli, cfg, config_path).await;
        }
    };

    apply_cli_overrides(&mut config, &cli);
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    run(cli, config, config_path).await
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
}

async fn run(
    cli: Cli,
    config: AppConfig,
    config_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   bcrypt cost : {}", config.security.bcrypt_cost);
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, !cli.no_migrate, !cli.no_admin).await,
        Command::WaitForDb => {
            let db = wait_for_database(
                &config.database.connection_config(),
                config.database.wait_retry(),
            )
            .await
            .map_err(|e| {
                error!("Database unavailable: {}", e);
                e
            })?;
            db.close().await?;
            Ok(())
        }
        Command::CreateSuperuser {
            email,
            password,
            name,
        } => {
            let db = wait_for_database(
                &config.database.connection_config(),
                config.database.wait_retry(),
            )
            .await?;
            if !cli.no_migrate {
                Migrator::up(&db, None).await?;
            }
            let users = build_user_service(&db, &config);
            let user = users
                .manager()
                .create_superuser(&email, &password, UserFields::named(name))
                .await?;
            info!("Superuser created: {}", user.email);
            db.close().await?;
            Ok(())
        }
    }
}

async fn serve(
    config: AppConfig,
    auto_migrate: bool,
    create_default_admin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate,
        create_default_admin,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
