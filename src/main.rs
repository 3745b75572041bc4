use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pex_core::constants::SYMPTOMS_ENDPOINT;
use pex_fixture::Fixture;

/// Main entry point for the fixture server
///
/// Serves the four expert-system endpoints from a YAML fixture so the client can run without the
/// production backend.
///
/// # Environment Variables
/// - `PEX_FIXTURE_ADDR`: listen address (default: "0.0.0.0:8080")
/// - `PEX_FIXTURE_FILE`: fixture file (default: "fixtures/plant_catalog.yaml")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If the fixture cannot be loaded or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pex=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("PEX_FIXTURE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()?;
    let path: PathBuf = std::env::var("PEX_FIXTURE_FILE")
        .unwrap_or_else(|_| "fixtures/plant_catalog.yaml".into())
        .into();

    let fixture = Fixture::load(&path)?;
    tracing::info!(
        "++ Loaded fixture {}: {} symptoms, {} diseases",
        path.display(),
        fixture.symptoms().len(),
        fixture.diseases().len()
    );

    let app = pex_fixture::router(Arc::new(fixture))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("++ Starting fixture API on {}", addr);
    tracing::info!("++ Try http://{}/{}", addr, SYMPTOMS_ENDPOINT);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
