mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::{process, sync::Arc};

use tower_http::trace::TraceLayer;

use handlers::grpc;
use repository::Repository;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notes_server=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        process::exit(1);
    });
    tracing::info!("Loaded config: {cfg:?}");

    // Repository creation and schema init
    let repo = Repository::new(&cfg).await.unwrap_or_else(|e| {
        tracing::error!("Failed to open note store: {e}");
        process::exit(1);
    });

    repo.init_schema().await.unwrap_or_else(|e| {
        tracing::error!("Failed to initialize note store: {e}");
        process::exit(1);
    });

    // Service creation
    let service = Arc::new(NoteService::new(repo));

    // gRPC server setup
    let mut builder = tonic::transport::Server::builder();
    if let Some(limit) = cfg.concurrency_limit_per_connection {
        builder = builder.concurrency_limit_per_connection(limit);
    }
    if let Some(timeout) = cfg.request_timeout {
        builder = builder.timeout(timeout);
    }

    let grpc_server = builder
        .layer(TraceLayer::new_for_grpc())
        .add_service(grpc::create_grpc_server(service))
        .serve_with_shutdown(cfg.listen_addr, shutdown_signal());

    tracing::info!("gRPC server starting, listening on {}", cfg.listen_addr);

    if let Err(e) = grpc_server.await {
        tracing::error!("gRPC server error: {e}");
        process::exit(1);
    }

    tracing::info!("gRPC server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
