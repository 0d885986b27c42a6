//! # Magpie CLI (`magpie`)
//!
//! Terminal client for a remote knowledge-base chat service.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `magpie login` | Authenticate and store the session token |
//! | `magpie chat` | Open the interactive chat |
//! | `magpie ingest url <URL>` | Submit a web page for ingestion |
//! | `magpie ingest pdf <FILE>` | Upload a PDF for ingestion |
//! | `magpie logout` | Clear the stored session token |
//! | `magpie status` | Show backend address and session state |
//!
//! The backend address comes from `~/.config/magpie/config.toml` or the
//! `MAGPIE_BACKEND_URL` environment variable, defaulting to a local server.

mod ingest;
mod repl;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use magpie_client::{ApiClient, AuthService, ChatService, KnowledgeService, UnauthorizedHook};
use magpie_core::MagpieError;
use magpie_core::config::AppConfig;
use magpie_core::session::SessionContext;
use magpie_core::token::TokenStore;
use magpie_infrastructure::{FileTokenStore, config_loader};
use status::UploadTracker;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "magpie",
    about = "Terminal client for a knowledge-base chat service",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults to
    /// `~/.config/magpie/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "MAGPIE_PASSWORD")]
        password: String,
    },
    /// Open the interactive chat
    Chat,
    /// Add content to the knowledge base
    Ingest {
        #[command(subcommand)]
        source: IngestSource,
    },
    /// Clear the stored session token
    Logout,
    /// Show backend address and session state
    Status,
}

#[derive(Subcommand)]
enum IngestSource {
    /// Submit a web page URL
    Url {
        url: String,
        /// CSS selector narrowing which part of the page to ingest
        #[arg(long)]
        selector: Option<String>,
    },
    /// Upload a PDF document
    Pdf { file: PathBuf },
}

/// Unauthorized hook wired to the CLI session: tear the session down and
/// flag the REPL so it returns the operator to the login prompt.
struct SessionEviction {
    session: Arc<SessionContext>,
    expired: Arc<AtomicBool>,
}

impl UnauthorizedHook for SessionEviction {
    fn on_unauthorized(&self) {
        let _ = self.session.logout();
        self.expired.store(true, Ordering::SeqCst);
    }
}

fn require_login(session: &SessionContext) -> bool {
    if session.is_authenticated() {
        return true;
    }
    println!(
        "{}",
        "Please log in first: magpie login --username <name>".yellow()
    );
    false
}

fn build_client(
    config: &AppConfig,
    store: Arc<dyn TokenStore>,
    session: Arc<SessionContext>,
) -> Result<(Arc<ApiClient>, Arc<AtomicBool>), MagpieError> {
    let expired = Arc::new(AtomicBool::new(false));
    let hook = Arc::new(SessionEviction {
        session,
        expired: expired.clone(),
    });
    let client = Arc::new(ApiClient::new(config, store)?.with_unauthorized_hook(hook));
    Ok((client, expired))
}

async fn login_command(
    config: &AppConfig,
    session: &SessionContext,
    username: &str,
    password: &str,
) -> Result<()> {
    let auth = AuthService::new(config)?;
    match auth.login(username, password).await {
        Ok(outcome) => {
            session.login(&outcome.token)?;
            println!("{}", "Logged in.".green());
            if let Some(message) = outcome.message {
                println!("{}", message.bright_black());
            }
            Ok(())
        }
        Err(err) => {
            let shown = match &err {
                MagpieError::Validation(message) | MagpieError::Api(message) => message.clone(),
                other => {
                    tracing::debug!("login failed: {other}");
                    "Login failed. Please try again.".to_string()
                }
            };
            eprintln!("{}", shown.red());
            std::process::exit(1);
        }
    }
}

async fn chat_command(
    config: &AppConfig,
    store: Arc<dyn TokenStore>,
    session: Arc<SessionContext>,
) -> Result<()> {
    if !require_login(&session) {
        return Ok(());
    }
    let (client, expired) = build_client(config, store, session.clone())?;
    let chat = ChatService::new(client.clone());
    let knowledge = KnowledgeService::new(client);
    repl::run(session, chat, knowledge, expired).await
}

async fn ingest_command(
    config: &AppConfig,
    store: Arc<dyn TokenStore>,
    session: Arc<SessionContext>,
    source: IngestSource,
) -> Result<()> {
    if !require_login(&session) {
        return Ok(());
    }
    let (client, _expired) = build_client(config, store, session)?;
    let knowledge = KnowledgeService::new(client);
    let tracker = UploadTracker::new();

    let outcome = match source {
        IngestSource::Url { url, selector } => {
            ingest::submit_url_flow(&knowledge, &tracker, &url, selector.as_deref()).await
        }
        IngestSource::Pdf { file } => ingest::upload_pdf_flow(&knowledge, &tracker, &file).await,
    };
    // Messages were already printed by the flow; only the exit code is left.
    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn logout_command(session: &SessionContext) -> Result<()> {
    session.logout()?;
    println!("{}", "Logged out.".green());
    Ok(())
}

fn status_command(config: &AppConfig, session: &SessionContext) {
    println!("Backend: {}", config.backend_url);
    if session.is_authenticated() {
        println!("{}", "Logged in".green());
    } else {
        println!("{}", "Not logged in".yellow());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = config_loader::load(cli.config.as_deref())?.with_env_override();
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new()?);
    let session = Arc::new(SessionContext::new(store.clone())?);

    match cli.command {
        Commands::Login { username, password } => {
            login_command(&config, &session, &username, &password).await
        }
        Commands::Chat => chat_command(&config, store, session).await,
        Commands::Ingest { source } => ingest_command(&config, store, session, source).await,
        Commands::Logout => logout_command(&session),
        Commands::Status => {
            status_command(&config, &session);
            Ok(())
        }
    }
}
