//! Career Counselor - LLM-backed career counseling service
//!
//! A Rust backend implementing a per-user counseling state machine that
//! delegates all prose to a text-generation backend.

mod api;
mod generator;
mod llm;
mod runtime;
mod session_store;
mod state_machine;
mod system_prompt;

use api::{create_router, AppState};
use generator::CounselorGenerator;
use llm::LlmConfig;
use runtime::Counselor;
use session_store::InMemorySessionStore;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "career_counselor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let host: IpAddr = std::env::var("COUNSELOR_HOST")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    let port: u16 = std::env::var("COUNSELOR_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // Initialize the generation backend; refuse to start without credentials
    let llm_config = LlmConfig::from_env();
    let llm = llm_config.build_service().map_err(|e| {
        tracing::error!(error = %e, "Cannot configure generation backend");
        e
    })?;
    tracing::info!(model = %llm.model_id(), gateway = llm_config.gateway.is_some(), "LLM backend initialized");

    // Create application state
    let counselor = Counselor::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(CounselorGenerator::new(llm)),
    );
    let state = AppState::new(counselor);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::new(host, port);
    tracing::info!("Career counselor listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
