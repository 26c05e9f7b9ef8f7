mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use spotsense_engine::{ExplanationProvider, OpenAiClient};

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(spotsense_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = spotsense_db::PoolConfig::from_app_config(&config);
    let pool = spotsense_db::connect_pool(&config.database_url, pool_config).await?;
    spotsense_db::run_migrations(&pool).await?;

    let explainer = Arc::new(build_explainer(&config));
    let app = build_app(
        AppState {
            pool,
            explainer,
        },
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Pick the explanation provider by credential availability.
///
/// A missing or unusable OpenAI key degrades to the deterministic template
/// rather than failing startup — explanations are never load-bearing.
fn build_explainer(config: &spotsense_core::AppConfig) -> ExplanationProvider {
    match &config.openai_api_key {
        Some(key) => match OpenAiClient::with_base_url(
            key,
            &config.openai_model,
            config.explain_timeout_secs,
            &config.openai_base_url,
        ) {
            Ok(client) => {
                tracing::info!(model = %config.openai_model, "generative explanations enabled");
                ExplanationProvider::OpenAi(client)
            }
            Err(e) => {
                tracing::warn!(error = %e, "explanation client unavailable; using deterministic fallback");
                ExplanationProvider::Deterministic
            }
        },
        None => {
            tracing::info!("OPENAI_API_KEY not set; using deterministic explanations");
            ExplanationProvider::Deterministic
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
