// Supervisor entry point: starts the server and dashboard children and
// drives the two-item control surface (open dashboard / quit).

use anyhow::Result;
use roastmon::*;
use tokio::io::AsyncBufReadExt;

const MENU: &str = "commands: open (dashboard in browser), status, quit";

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = config::AppConfig::load()?;
    logging::init_with_file(&app_config.supervisor.log_file)?;
    tracing::info!(version = version::VERSION, "supervisor starting");

    let mut supervisor = match supervisor::Supervisor::start(&app_config).await {
        Ok(supervisor) => supervisor,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return Err(e);
        }
    };
    let dashboard_url = format!(
        "http://{}:{}/",
        app_config.dashboard.host, app_config.dashboard.port
    );

    println!("{} v{} children up", version::NAME, version::VERSION);
    println!("dashboard: {dashboard_url}");
    println!("{MENU}");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(input)) => match input.trim() {
                        "open" | "o" => {
                            if let Err(e) = supervisor::open_in_browser(&dashboard_url) {
                                tracing::warn!(error = %e, "browser launch failed");
                                println!("could not open browser: {e}");
                            }
                        }
                        "status" | "s" => println!("{}", supervisor.status()),
                        "quit" | "q" => break,
                        "" => {}
                        other => {
                            println!("unknown command: {other}");
                            println!("{MENU}");
                        }
                    },
                    // stdin closed (e.g. running detached): keep serving until
                    // a signal arrives.
                    Ok(None) => {
                        tokio::signal::ctrl_c().await?;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin read failed");
                        tokio::signal::ctrl_c().await?;
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    supervisor.shutdown()?;
    tracing::info!("supervisor exiting");
    Ok(())
}
