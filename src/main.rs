mod discover;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use client::config::{ClientConfig, ConfigError};
use client::net::api::HttpApi;
use client::net::error::ApiError;
use client::net::guard::SessionGuard;
use client::net::types::{LoginCredentials, OnboardingStatus, ProfileResponse, RegisterData, User};
use client::state::auth::Session;
use client::util::auth::enforce_login;
use client::util::nav::MemoryNavigator;
use client::util::storage::FileStorage;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("not logged in; run `campusmatch login` first")]
    NotLoggedIn,
}

#[derive(Parser, Debug)]
#[command(name = "campusmatch", about = "CampusMatch terminal client")]
struct Cli {
    #[arg(long, env = "CAMPUSMATCH_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "CAMPUSMATCH_STATE_PATH")]
    state_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CAMPUSMATCH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not log in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CAMPUSMATCH_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        role: Option<String>,
    },
    Logout,
    /// Show the logged-in user.
    Me,
    /// Show the own profile and onboarding progress.
    Profile,
    /// Swipe through candidate profiles.
    Discover,
    /// List likes sent, or received with `--received`.
    Likes {
        #[arg(long, default_value_t = false)]
        received: bool,
    },
    Matches,
}

#[derive(Serialize)]
struct ProfileView {
    profile: ProfileResponse,
    onboarding: OnboardingStatus,
}

struct App {
    session: Arc<Session>,
    api: HttpApi,
}

impl App {
    fn new(config: &ClientConfig) -> Result<Self, CliError> {
        let storage = Arc::new(FileStorage::open(&config.state_path));
        let navigator = Arc::new(MemoryNavigator::default());
        let session = Arc::new(Session::new(storage, navigator));
        let api = HttpApi::new(config, SessionGuard::new(session.clone()))?;
        Ok(Self { session, api })
    }

    /// Load the user if needed and fail unless one is present.
    async fn require_login(&self) -> Result<User, CliError> {
        self.session.load_current_user(&self.api).await;
        if !enforce_login(&self.session) {
            return Err(CliError::NotLoggedIn);
        }
        self.session.current_user().ok_or(CliError::NotLoggedIn)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::debug!(api_url = %config.api_url, state_path = %config.state_path.display(), "configured");
    let app = App::new(&config)?;

    match cli.command {
        Command::Login { username, password } => run_login(&app, username, password).await,
        Command::Register { username, password, role } => run_register(&app, username, password, role).await,
        Command::Logout => {
            app.session.logout();
            println!("logged out");
            Ok(())
        }
        Command::Me => {
            let user = app.require_login().await?;
            print_json(&user)
        }
        Command::Profile => {
            app.require_login().await?;
            let profile = app.api.my_profile().await?;
            let onboarding = app.api.onboarding_status().await?;
            print_json(&ProfileView { profile, onboarding })
        }
        Command::Discover => {
            app.require_login().await?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            discover::run(&app.api, stdin, &mut std::io::stdout()).await
        }
        Command::Likes { received } => {
            app.require_login().await?;
            let likes = if received { app.api.likes_received().await? } else { app.api.likes_sent().await? };
            print_json(&likes)
        }
        Command::Matches => {
            app.require_login().await?;
            print_json(&app.api.matches().await?)
        }
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = &cli.state_path {
        config.state_path.clone_from(path);
    }
    Ok(config)
}

async fn run_login(app: &App, username: String, password: String) -> Result<(), CliError> {
    let credentials = LoginCredentials { username, password };
    if !app.session.login(&app.api, &credentials).await {
        return Err(rejection(&app.session));
    }
    match app.session.current_user() {
        Some(user) => println!("logged in as {}", user.username),
        None => println!("logged in"),
    }
    Ok(())
}

async fn run_register(app: &App, username: String, password: String, role: Option<String>) -> Result<(), CliError> {
    let data = RegisterData { username, password, role };
    if !app.session.register(&app.api, &data).await {
        return Err(rejection(&app.session));
    }
    println!("registered {}; run `campusmatch login` to continue", data.username);
    Ok(())
}

fn rejection(session: &Session) -> CliError {
    CliError::Rejected(session.state().error.unwrap_or_else(|| "request failed".to_owned()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
