//! Catalog Server - HTTP API for the interview question catalog
//!
//! Provides REST endpoints for:
//! - Question search with company, difficulty and category facets
//! - Question detail, related questions and solutions
//! - Solution votes and bookmarks
//! - Company, category and catalog statistics listings

use anyhow::Result;
use axum::{
    routing::{get, post, put},
    Router,
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog_core::CatalogConfig;

mod error;
mod handlers;
mod state;

use state::AppState;

/// Command-line arguments for the catalog server
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(about = "HTTP API for browsing interview questions")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Catalog JSON file (overrides CATALOG_DATA_PATH)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Bookmark file (overrides CATALOG_BOOKMARKS_PATH)
    #[arg(long)]
    bookmarks: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the router with all routes and middleware
fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Question endpoints
        .route("/api/questions", get(handlers::list_questions))
        .route("/api/questions/:id", get(handlers::get_question))
        .route("/api/questions/:id/related", get(handlers::related_questions))
        .route("/api/questions/:id/solutions", get(handlers::list_solutions))
        // Votes
        .route("/api/solutions/:id/upvote", post(handlers::upvote_solution))
        .route("/api/solutions/:id/downvote", post(handlers::downvote_solution))
        // Bookmarks
        .route("/api/bookmarks", get(handlers::list_bookmarks))
        .route(
            "/api/bookmarks/:id",
            put(handlers::add_bookmark).delete(handlers::remove_bookmark),
        )
        // Reference data
        .route("/api/companies", get(handlers::list_companies))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/stats", get(handlers::stats))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = CatalogConfig::from_env()?;
    if let Some(path) = args.data {
        config = config.with_data_path(path);
    }
    if let Some(path) = args.bookmarks {
        config = config.with_bookmarks_path(path);
    }

    // Initialize application state
    info!("Initializing application state...");
    let state = Arc::new(AppState::new(config)?);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
