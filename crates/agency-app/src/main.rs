//! # Spy Cat Agency - HTTP server
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring            │
//! │    │                                                            │
//! │    ├── Loads: AgencyConfig (file, then flags / env)             │
//! │    ├── Creates: PostgreSQL or in-memory repositories (adapter)  │
//! │    ├── Creates: AgentService, MissionService (usecase)          │
//! │    ├── Creates: CatApiBreedCatalog (adapter)                    │
//! │    └── Runs: the axum router until Ctrl-C                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use agency_adapter::{router, AppState, CatApiBreedCatalog, Database, InMemoryStore};
use agency_usecase::{AgentService, MissionService};
use anyhow::{bail, Context};
use clap::Parser;
use shared::AgencyConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "agency")]
#[command(about = "Spy Cat Agency - cats, missions and targets over HTTP")]
#[command(version)]
struct Args {
    /// JSON or YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// PostgreSQL connection string
    #[arg(long, env = "DB_SOURCE")]
    database_url: Option<String>,

    /// Endpoint serving the breed whitelist
    #[arg(long, env = "BREEDS_URL")]
    breeds_url: Option<String>,

    /// Log filter directive
    #[arg(long, env = "RUST_LOG")]
    log_filter: Option<String>,

    /// Keep everything in memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,

    /// Do not apply database migrations on startup
    #[arg(long)]
    skip_migrations: bool,
}

impl Args {
    /// File first, then whatever was given on the command line or in the environment
    fn load_config(&self) -> anyhow::Result<AgencyConfig> {
        let mut config = match &self.config {
            Some(path) => AgencyConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => AgencyConfig::default(),
        };

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(url) = &self.breeds_url {
            config.breeds.source_url = url.clone();
        }
        if let Some(filter) = &self.log_filter {
            config.log.filter = filter.clone();
        }
        if self.skip_migrations {
            config.database.run_migrations = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Wire repositories, services and the breed catalog together
async fn build_state(config: &AgencyConfig, in_memory: bool) -> anyhow::Result<AppState> {
    let (agents, missions) = if in_memory {
        warn!("running with the in-memory store, data is lost on exit");
        let store = InMemoryStore::new();
        (
            AgentService::new(Arc::new(store.agent_repository())),
            MissionService::new(Arc::new(store.mission_repository())),
        )
    } else {
        let Some(url) = config.database.url.as_deref() else {
            bail!("no database configured: set DB_SOURCE, database.url, or pass --in-memory");
        };
        let db = Database::connect(url, config.database.max_connections)
            .await
            .context("failed to connect to PostgreSQL")?;
        if config.database.run_migrations {
            db.migrate().await.context("failed to run migrations")?;
        }
        (
            AgentService::new(Arc::new(db.agent_repository())),
            MissionService::new(Arc::new(db.mission_repository())),
        )
    };

    Ok(AppState {
        agents: Arc::new(agents),
        missions: Arc::new(missions),
        breeds: Arc::new(CatApiBreedCatalog::new(config.breeds.source_url.clone())),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    init_tracing(&config.log.filter);

    info!("🐈 Spy Cat Agency");

    let state = build_state(&config, args.in_memory).await?;
    let app = router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(address = %address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}
