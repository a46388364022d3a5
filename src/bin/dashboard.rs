// Dashboard entry point: poll loop plus page server

use anyhow::Result;
use roastmon::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let app_config = config::AppConfig::load()?;
    let client = dashboard::ApiClient::new(
        &app_config.dashboard.api_url,
        Duration::from_millis(app_config.dashboard.request_timeout_ms),
    )?;

    let page = dashboard::shared_page();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let poll_handle = dashboard::spawn(
        dashboard::PollDeps {
            client,
            page: page.clone(),
            shutdown_rx,
        },
        dashboard::PollConfig {
            poll_interval_ms: app_config.dashboard.poll_interval_ms,
            history_length: app_config.dashboard.history_length,
        },
    );

    let app = dashboard::app(page);
    let addr = format!(
        "{}:{}",
        app_config.dashboard.host, app_config.dashboard.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = poll_handle.await;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
