use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chamados_gateway::store::MongoStore;
use chamados_gateway::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "chamados_gateway=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let port = match args.command {
        Some(cli::Commands::Serve { port }) => port,
        None => cfg.port,
    };

    let result = run_server(cfg, port).await;
    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Connecting to database...");
    let store = MongoStore::connect(&cfg.mongo_uri, &cfg.mongo_db)
        .await
        .map_err(|e| anyhow::anyhow!("database connection failed: {}", e))?;

    let state = Arc::new(AppState::new(Arc::new(store), cfg));
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Chamados backend listening on {}", addr);
    tracing::info!("POST /logar (open)");
    tracing::info!("GET/POST /chamados, GET/PUT/DELETE /chamados/:id, GET /relatorio (gated)");
    axum::serve(listener, app).await?;

    Ok(())
}
