mod config;
mod errors;
mod generation;
mod llm_client;
mod retrieval;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::retrieval::corpus::CorpusHandle;
use crate::retrieval::vocabulary::Vocabulary;
use crate::retrieval::StoryRetriever;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Story API v{}", env!("CARGO_PKG_VERSION"));

    // Load retrieval vocabulary and reference corpus (both degrade, never fail)
    let vocabulary = Vocabulary::load(&config.vocabulary_path);
    let corpus = CorpusHandle::open(config.corpus_path.clone());
    let retriever = StoryRetriever::new(corpus, vocabulary, &config.organization_name)
        .with_default_top_k(config.retrieval_top_k);
    info!(
        "Retriever ready: {} reference examples from {}, top_k={}",
        retriever.corpus().len(),
        config.corpus_path.display(),
        retriever.default_top_k()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        retriever: Arc::new(retriever),
        generator: Arc::new(llm),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict allowed origins once the frontend host is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
