use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS name or literal IP address, trimmed but otherwise unvalidated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Host(String);

impl Host {
    /// Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Reachable,
    Unreachable,
}

impl ProbeStatus {
    pub fn is_reachable(self) -> bool {
        matches!(self, ProbeStatus::Reachable)
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Reachable => f.write_str("reachable"),
            ProbeStatus::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Packet statistics scraped from ping's summary lines. Console only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PingStats {
    pub packet_loss: Option<f64>,
    pub avg_rtt_ms: Option<f64>,
}

/// One record per host per run. Only `host`, `status` and `timestamp`
/// are persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub host: String,
    pub status: ProbeStatus,
    pub timestamp: String, // probe start, "%Y-%m-%d %H:%M:%S" local

    #[serde(skip)]
    pub detail: String,

    #[serde(skip)]
    pub stats: PingStats,
}

impl ProbeResult {
    pub fn new(host: &Host, status: ProbeStatus, timestamp: String, detail: String) -> Self {
        Self {
            host: host.as_str().to_string(),
            status,
            timestamp,
            detail,
            stats: PingStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: PingStats) -> Self {
        self.stats = stats;
        self
    }
}
