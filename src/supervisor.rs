// Child-process supervision for the server and dashboard binaries

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::config::AppConfig;

const TERMINATE_POLL_MS: u64 = 50;

/// One supervised child. Termination is graceful-then-forced and idempotent:
/// a child that already exited (or was already terminated) is a no-op.
pub struct ManagedChild {
    name: String,
    child: Option<Child>,
}

impl ManagedChild {
    pub fn spawn(name: &str, command: &mut Command) -> anyhow::Result<Self> {
        let child = command
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| anyhow::anyhow!("failed to start {}: {}", name, e))?;
        Ok(Self {
            name: name.to_string(),
            child: Some(child),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(|c| c.id())
    }

    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Graceful signal, bounded wait, then force kill. Never hangs; safe to
    /// call repeatedly and after the child died on its own.
    pub fn terminate(&mut self, grace: Duration) -> anyhow::Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if let Ok(Some(status)) = child.try_wait() {
            tracing::debug!(child = %self.name, %status, "child already exited");
            return Ok(());
        }

        send_term(child.id());
        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if let Ok(Some(status)) = child.try_wait() {
                tracing::info!(child = %self.name, %status, "child terminated");
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(TERMINATE_POLL_MS));
        }

        tracing::warn!(child = %self.name, grace_ms = grace.as_millis() as u64, "child ignored graceful signal; force killing");
        let _ = child.kill();
        let _ = child.wait();
        Ok(())
    }
}

#[cfg(unix)]
fn send_term(pid: u32) {
    // No signal crate in the stack; the kill(1) shim keeps the graceful path
    // portable across unixes.
    let _ = Command::new("kill")
        .args(["-TERM", &pid.to_string()])
        .status();
}

#[cfg(not(unix))]
fn send_term(_pid: u32) {
    // No graceful signal available; the force-kill fallback handles it.
}

/// Runs the server and dashboard as independent children with ordered
/// startup and signal-based teardown.
pub struct Supervisor {
    server: ManagedChild,
    dashboard: ManagedChild,
    grace: Duration,
}

impl Supervisor {
    /// Starts the server, waits the warm-up delay, verifies the server child
    /// survived it, then starts the dashboard. A server that dies during
    /// warm-up aborts startup.
    pub async fn start(config: &AppConfig) -> anyhow::Result<Self> {
        let grace = Duration::from_millis(config.supervisor.terminate_grace_ms);

        let mut server = ManagedChild::spawn(
            "roastmon-server",
            &mut Command::new(sibling_binary("roastmon-server")?),
        )?;
        tracing::info!(pid = server.id(), "server child started");

        tokio::time::sleep(Duration::from_millis(config.supervisor.warmup_ms)).await;
        if !server.is_running() {
            let _ = server.terminate(grace);
            anyhow::bail!("server child exited during warm-up; aborting startup");
        }

        let dashboard = match ManagedChild::spawn(
            "roastmon-dashboard",
            &mut Command::new(sibling_binary("roastmon-dashboard")?),
        ) {
            Ok(dashboard) => dashboard,
            Err(e) => {
                let _ = server.terminate(grace);
                return Err(e);
            }
        };
        tracing::info!(pid = dashboard.id(), "dashboard child started");

        Ok(Self {
            server,
            dashboard,
            grace,
        })
    }

    /// One-line liveness report for the control surface.
    pub fn status(&mut self) -> String {
        fn describe(child: &mut ManagedChild) -> String {
            if child.is_running() {
                match child.id() {
                    Some(pid) => format!("{} running (pid {})", child.name(), pid),
                    None => format!("{} running", child.name()),
                }
            } else {
                format!("{} stopped", child.name())
            }
        }
        format!(
            "{}; {}",
            describe(&mut self.server),
            describe(&mut self.dashboard)
        )
    }

    /// Terminates both children. Idempotent; children that already exited
    /// are no-ops.
    pub fn shutdown(&mut self) -> anyhow::Result<()> {
        self.dashboard.terminate(self.grace)?;
        self.server.terminate(self.grace)?;
        tracing::info!("all children terminated");
        Ok(())
    }
}

/// The child binaries ship next to the supervisor binary.
fn sibling_binary(name: &str) -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("current executable has no parent directory"))?;
    Ok(dir.join(name))
}

/// Opens the dashboard URL in the default browser.
pub fn open_in_browser(url: &str) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", url]);
        c
    };
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };
    command
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to open browser: {}", e))?;
    Ok(())
}
