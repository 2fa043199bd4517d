/// Mixtape Server - media-bookmarking server
use clap::{Parser, Subcommand};
use mixtape_core::{NewUser, PlaylistStore};
use mixtape_server::{
    api,
    config::ServerConfig,
    services::{AuthService, FileStorage, YouTubeSearch},
    state::AppState,
};
use mixtape_storage::JsonStore;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mixtape-server")]
#[command(about = "Mixtape media-bookmarking server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name; defaults to the username
        #[arg(short, long)]
        display_name: Option<String>,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixtape_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::AddUser {
            username,
            password,
            display_name,
        } => add_user(&username, &password, display_name.as_deref()).await?,
        Commands::ListUsers => list_users().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Mixtape Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Open the library document
    let store = JsonStore::open(&config.storage.library_path).await?;
    let store = Arc::new(store);
    tracing::info!("Library loaded from {}", config.storage.library_path.display());

    // Initialize file storage
    let file_storage = FileStorage::new(config.storage.uploads_path.clone());
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!("Upload storage initialized");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));

    // Initialize search provider
    let search = Arc::new(YouTubeSearch::new(
        config.search.youtube_api_key.clone(),
        config.search.max_results,
    ));
    if config.search.youtube_api_key.is_empty() {
        tracing::warn!("No search API key configured; /api/search will be unavailable");
    }

    // Build application state and router
    let app_state = AppState::new(store, auth_service, file_storage, search);
    let app = api::create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(username: &str, password: &str, display_name: Option<&str>) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;
    let store = JsonStore::open(&config.storage.library_path).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let password_hash = auth_service.hash_password(password)?;
    let user = store
        .create_user(NewUser {
            username: username.to_string(),
            password_hash,
            display_name: display_name.unwrap_or(username).to_string(),
            avatar_url: "/avatars/default.png".to_string(),
        })
        .await?;

    println!("Created user {} ({})", user.username, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let store = JsonStore::open(&config.storage.library_path).await?;

    let users = store.list_users().await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} ({} playlists)",
            user.id,
            user.username,
            user.playlists.len()
        );
    }

    Ok(())
}
