use std::{env, net::SocketAddr};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use blogkit_rs::{AppState, BasePath, build_router, graceful_shutdown};

/// The web server for blogkit_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    /// Falls back to the BLOG_DB_PATH environment variable, then 'blog.db'.
    #[arg(long)]
    db_path: Option<String>,

    /// The port to serve the app from.
    /// Falls back to the PORT environment variable, then 3000.
    #[arg(short, long)]
    port: Option<u16>,

    /// The path prefix the app is served under, e.g. '/blog'.
    /// Falls back to the BASE_URL environment variable.
    #[arg(long)]
    base_path: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let db_path = resolve_db_path(args.db_path, env::var("BLOG_DB_PATH").ok());
    let port = resolve_port(args.port, env::var("PORT").ok());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let base_path = args
        .base_path
        .or_else(|| env::var("BASE_URL").ok())
        .unwrap_or_default();

    let connection = Connection::open(&db_path).expect("Could not open database");
    let state = AppState::new(connection, BasePath::new(&base_path))
        .expect("Could not initialize the database");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

/// Pick the database path from the CLI argument, the BLOG_DB_PATH
/// environment variable, or the 'blog.db' default, in that order.
fn resolve_db_path(arg: Option<String>, env_value: Option<String>) -> String {
    arg.or(env_value).unwrap_or_else(|| "blog.db".to_string())
}

/// Pick the port from the CLI argument, the PORT environment variable, or
/// the default 3000, in that order. A PORT value that is not a valid port
/// number is ignored.
fn resolve_port(arg: Option<u16>, env_value: Option<String>) -> u16 {
    arg.or_else(|| env_value.and_then(|value| value.parse().ok()))
        .unwrap_or(3000)
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
