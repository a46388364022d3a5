use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub sensors: SensorConfig,
    #[serde(default)]
    pub supervisor: SupervisorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub port: u16,
    pub host: String,
    /// Base URL of the stats server the dashboard polls.
    pub api_url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Per-request timeout for the stats/roast calls.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Number of samples kept for the usage chart.
    #[serde(default = "default_history_length")]
    pub history_length: usize,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    300
}

fn default_history_length() -> usize {
    60
}

/// Which hardware categories the provider session opens.
/// Mirrors the native provider's enable flags; storage and network stay off.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    #[serde(default = "default_true")]
    pub cpu: bool,
    #[serde(default = "default_true")]
    pub gpu: bool,
    #[serde(default = "default_true")]
    pub memory: bool,
    #[serde(default = "default_true")]
    pub motherboard: bool,
    #[serde(default = "default_true")]
    pub controller: bool,
    #[serde(default)]
    pub storage: bool,
    #[serde(default)]
    pub network: bool,
    /// Explicit path to the NVML shared library. Empty means system lookup.
    #[serde(default)]
    pub nvml_path: String,
}

fn default_true() -> bool {
    true
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            cpu: true,
            gpu: true,
            memory: true,
            motherboard: true,
            controller: true,
            storage: false,
            network: false,
            nvml_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupervisorConfig {
    /// Delay between starting the server child and the dashboard child.
    #[serde(default = "default_warmup_ms")]
    pub warmup_ms: u64,
    /// How long terminate waits after the graceful signal before force-killing.
    #[serde(default = "default_terminate_grace_ms")]
    pub terminate_grace_ms: u64,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_warmup_ms() -> u64 {
    2000
}

fn default_terminate_grace_ms() -> u64 {
    1500
}

fn default_log_file() -> String {
    "roastmon.log".into()
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            warmup_ms: default_warmup_ms(),
            terminate_grace_ms: default_terminate_grace_ms(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.dashboard.port > 0,
            "dashboard.port must be between 1 and 65535, got {}",
            self.dashboard.port
        );
        anyhow::ensure!(
            !self.dashboard.api_url.is_empty(),
            "dashboard.api_url must be non-empty"
        );
        anyhow::ensure!(
            self.dashboard.poll_interval_ms > 0,
            "dashboard.poll_interval_ms must be > 0, got {}",
            self.dashboard.poll_interval_ms
        );
        anyhow::ensure!(
            self.dashboard.request_timeout_ms > 0,
            "dashboard.request_timeout_ms must be > 0, got {}",
            self.dashboard.request_timeout_ms
        );
        anyhow::ensure!(
            self.dashboard.history_length > 0,
            "dashboard.history_length must be > 0, got {}",
            self.dashboard.history_length
        );
        anyhow::ensure!(
            self.supervisor.warmup_ms > 0,
            "supervisor.warmup_ms must be > 0, got {}",
            self.supervisor.warmup_ms
        );
        anyhow::ensure!(
            self.supervisor.terminate_grace_ms > 0,
            "supervisor.terminate_grace_ms must be > 0, got {}",
            self.supervisor.terminate_grace_ms
        );
        anyhow::ensure!(
            !self.supervisor.log_file.is_empty(),
            "supervisor.log_file must be non-empty"
        );
        Ok(())
    }
}
