//! Host reachability via the system `ping` binary.

use super::errors::HostpingError;
use super::models::{Host, PingStats, ProbeResult, ProbeStatus};
use crate::config::PingConfig;
use crate::executors::command;
use crate::utils::time;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static LOSS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)% (?:packet )?loss").expect("valid regex"));

// Linux/BSD "min/avg/max/mdev = a/b/c/d ms", Windows "Average = 12ms"
static AVG_RTT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"= [\d.]+/([\d.]+)/|Average = (\d+(?:\.\d+)?)ms").expect("valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Unix,
}

impl OsFamily {
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }

    fn count_flag(self) -> &'static str {
        match self {
            OsFamily::Windows => "-n",
            OsFamily::Unix => "-c",
        }
    }
}

/// Echo requests per probe. Not configurable.
pub const ECHO_COUNT: u32 = 4;

#[derive(Clone, Debug)]
pub struct PingCommand {
    pub program: String,
    pub family: OsFamily,
}

impl PingCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            family: OsFamily::current(),
        }
    }

    /// `-4 <count flag> 4 <host>`: forced IPv4, fixed echo count.
    pub fn args(&self, host: &Host) -> Vec<String> {
        vec![
            "-4".to_string(),
            self.family.count_flag().to_string(),
            ECHO_COUNT.to_string(),
            host.as_str().to_string(),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct Prober {
    command: PingCommand,
}

impl Prober {
    pub fn new(command: PingCommand) -> Self {
        Self { command }
    }

    pub fn from_config(config: &PingConfig) -> Self {
        Self::new(PingCommand::new(config.program.clone()))
    }

    /// Probes `host` once. Never fails: timeouts, launch errors and nonzero
    /// exits all classify as `Unreachable` with a detail message.
    pub async fn probe(&self, host: &Host, timeout: Duration) -> ProbeResult {
        let timestamp = time::now_timestamp();
        let args = self.command.args(host);

        match command::execute(&self.command.program, &args, timeout).await {
            Ok(output) if output.success => {
                let stats = parse_stats(&output.stdout);
                ProbeResult::new(host, ProbeStatus::Reachable, timestamp, output.stdout)
                    .with_stats(stats)
            }
            Ok(output) => {
                tracing::debug!(
                    "{} exited with {:?} after {}ms",
                    host,
                    output.exit_code,
                    output.duration_ms
                );
                let stats = parse_stats(&output.stdout);
                let detail = if output.stderr.trim().is_empty() {
                    output.stdout
                } else {
                    output.stderr
                };
                ProbeResult::new(host, ProbeStatus::Unreachable, timestamp, detail)
                    .with_stats(stats)
            }
            Err(HostpingError::Timeout { timeout, .. }) => {
                tracing::info!("Ping to {} timed out", host);
                let detail = format!(
                    "Ping to {} timed out after {} seconds",
                    host,
                    timeout.as_secs_f64()
                );
                ProbeResult::new(host, ProbeStatus::Unreachable, timestamp, detail)
            }
            Err(e) => {
                tracing::warn!("Ping to {} could not run: {}", host, e);
                ProbeResult::new(host, ProbeStatus::Unreachable, timestamp, e.to_string())
            }
        }
    }
}

pub fn parse_stats(output: &str) -> PingStats {
    let packet_loss = LOSS_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok());

    let avg_rtt_ms = AVG_RTT_RE
        .captures(output)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .and_then(|m| m.as_str().parse().ok());

    PingStats {
        packet_loss,
        avg_rtt_ms,
    }
}
