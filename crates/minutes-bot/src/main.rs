mod api;
mod discord;
mod pipeline;
mod scheduler;
mod stats;

use std::sync::Arc;

use minutes_core::{AppConfig, LogFormat, TitlePolicy};
use minutes_llm::Analyzer;
use minutes_notify::{Dispatcher, ReqwestTransport};
use minutes_notion::{NotionClient, Publisher};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::{pipeline::PipelineCoordinator, stats::PipelineStats};

/// Dependencies whose own logging is capped at `warn`.
const QUIET_TARGETS: [&str; 5] = [
    "serenity",
    "tungstenite",
    "hyper",
    "reqwest",
    "tokio_cron_scheduler",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = minutes_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::info!(?config, "configuration loaded");

    let stats = Arc::new(PipelineStats::new());
    let coordinator = Arc::new(build_coordinator(&config, Arc::clone(&stats))?);

    let _scheduler = scheduler::build_scheduler(
        config.render_external_url.as_deref(),
        config.self_ping_interval_secs,
        config.http_timeout_secs,
    )
    .await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(());
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "status server listening");
    let app = api::build_app(Arc::clone(&stats));
    let mut server_rx = shutdown_rx.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = server_rx.changed().await;
            })
            .await
    });

    let mut client =
        discord::build_client(&config.discord_bot_token, coordinator, Arc::clone(&stats)).await?;
    let shard_manager = Arc::clone(&client.shard_manager);
    let mut gateway_rx = shutdown_rx;
    tokio::spawn(async move {
        let _ = gateway_rx.changed().await;
        shard_manager.shutdown_all().await;
    });

    tracing::info!("connecting to discord gateway");
    client.start().await?;

    server.await??;
    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(&config.log_level)))?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.log_format {
        LogFormat::Json => subscriber.json().with_current_span(true).init(),
        LogFormat::Pretty => subscriber.init(),
    }
    Ok(())
}

fn filter_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |acc, target| format!("{acc},{target}=warn"))
}

fn build_coordinator(
    config: &AppConfig,
    stats: Arc<PipelineStats>,
) -> anyhow::Result<PipelineCoordinator> {
    let provider = minutes_llm::build_provider(config)?;
    let analyzer = Analyzer::new(provider, TitlePolicy::new(config.own_org_names.clone()));

    let notion = NotionClient::new(config.http_timeout_secs)?;
    let publisher = Publisher::new(
        Arc::new(notion),
        Arc::new(config.channel_destinations.clone()),
        config.notion_title_property.clone(),
    );

    let transport = ReqwestTransport::new(config.http_timeout_secs)?;
    let dispatcher = Dispatcher::new(Arc::new(transport), config.make_webhook_url.clone());

    Ok(PipelineCoordinator::new(
        Arc::new(analyzer),
        Arc::new(publisher),
        Arc::new(dispatcher),
        stats,
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_quiet_noisy_dependencies() {
        let directives = filter_directives("info");
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("serenity=warn"));
        assert!(directives.contains("reqwest=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn filter_directives_accept_custom_level() {
        let directives = filter_directives("minutes_bot=debug");
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
