// Dashboard: 1 Hz poll loop over the stats API plus a page server

mod cards;
mod history;
pub mod render;

pub use cards::{Card, build_cards, rows, shows_value};
pub use history::{HistoryWindow, Sample};

use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{Router, extract::State, response::Html, routing::get};
use tokio::sync::oneshot;
use tokio::time::interval;

use crate::models::{RoastResponse, SystemStats};

/// Latest rendered page, shared between the poll loop and the page server.
pub type SharedPage = Arc<RwLock<String>>;

pub fn shared_page() -> SharedPage {
    Arc::new(RwLock::new(render::waiting_page()))
}

/// Client for the snapshot server: one stats call, then one roast call, each
/// with a short timeout. Any failure means "no data this cycle".
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch(&self) -> anyhow::Result<(SystemStats, RoastResponse)> {
        let stats: SystemStats = self
            .http
            .get(format!("{}/stats", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let roast: RoastResponse = self
            .http
            .get(format!("{}/roast", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok((stats, roast))
    }
}

/// Client, page slot, and shutdown for the poll loop.
pub struct PollDeps {
    pub client: ApiClient,
    pub page: SharedPage,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct PollConfig {
    pub poll_interval_ms: u64,
    pub history_length: usize,
}

/// Spawns the render loop: strictly sequential stats + roast + render once
/// per tick, waiting page on any transport failure, stops on shutdown.
pub fn spawn(deps: PollDeps, config: PollConfig) -> tokio::task::JoinHandle<()> {
    let PollDeps {
        client,
        page,
        mut shutdown_rx,
    } = deps;

    tokio::spawn(async move {
        let mut history = HistoryWindow::new(config.history_length);
        let mut tick = interval(Duration::from_millis(config.poll_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let html = match client.fetch().await {
                        Ok((stats, roast)) => {
                            let time = chrono::Local::now().format("%H:%M:%S").to_string();
                            history.push(time, &stats);
                            let cards = build_cards(&stats);
                            render::page(&history, &cards, &roast.message)
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "poll failed; showing waiting page");
                            render::waiting_page()
                        }
                    };
                    match page.write() {
                        Ok(mut slot) => *slot = html,
                        Err(e) => tracing::warn!(error = %e, "page lock poisoned"),
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Dashboard poll loop shutting down");
                    break;
                }
            }
        }
    })
}

/// Page server: a single route returning the most recently rendered page.
pub fn app(page: SharedPage) -> Router {
    Router::new()
        .route("/", get(page_handler)) // GET /
        .with_state(page)
}

async fn page_handler(State(page): State<SharedPage>) -> Html<String> {
    let html = page
        .read()
        .map(|p| p.clone())
        .unwrap_or_else(|_| render::waiting_page());
    Html(html)
}
