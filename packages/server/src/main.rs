use std::sync::Arc;

use anyhow::Context;
use scorer::ScoringClient;
use tracing::info;

use server::config::AppConfig;
use server::orchestrator::InterviewOrchestrator;
use server::state::AppState;
use server::store::SqlResultStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = server::database::init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    let store = Arc::new(SqlResultStore::new(db, config.database.timeout()));
    let scorer = Arc::new(
        ScoringClient::new(&config.scoring).context("Failed to create scoring client")?,
    );
    info!(url = %scorer.base_url(), "Scoring service configured");

    let mut orchestrator = InterviewOrchestrator::new(store, scorer);
    if config.workflow.serialize_per_interview {
        info!("Per-interview serialization enabled");
        orchestrator = orchestrator.with_interview_locks();
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        config,
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
