//! Persisted history of runs: one JSON object mapping run labels to the
//! results of that run. The file is always rewritten whole.

use crate::core::errors::HostpingError;
use crate::core::models::ProbeResult;
use crate::utils::{fs::atomic_write, time};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;

const LABEL_PREFIX: &str = "Results from ";

pub fn run_label(completed_at: &str) -> String {
    format!("{}{}", LABEL_PREFIX, completed_at)
}

/// Appends a finished run under a label built from the current time and
/// returns the label actually used.
pub fn append_run(path: &Path, results: &[ProbeResult]) -> Result<String, HostpingError> {
    append_run_at(path, results, &time::now_timestamp())
}

pub fn append_run_at(
    path: &Path,
    results: &[ProbeResult],
    completed_at: &str,
) -> Result<String, HostpingError> {
    let mut log = RunLog::load(path);
    let label = log.insert_run(&run_label(completed_at), results)?;
    log.save(path)?;
    tracing::info!("Saved {} results to {:?} under {:?}", results.len(), path, label);
    Ok(label)
}

#[derive(Debug, Default)]
pub struct RunLog {
    // serde_json is built with preserve_order, so this keeps insertion order
    runs: Map<String, Value>,
}

impl RunLog {
    /// Reads the log at `path`. A missing, unreadable or malformed file
    /// yields an empty log; anything other than "missing" is warned about
    /// because the next save discards it.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No run log at {:?}, starting fresh", path);
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Could not read run log {:?} ({}), starting fresh", path, e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(runs)) => Self { runs },
            Ok(other) => {
                tracing::warn!(
                    "Run log {:?} holds a JSON {} instead of an object; previous history will be replaced",
                    path,
                    json_kind(&other)
                );
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Run log {:?} is not valid JSON ({}); previous history will be replaced",
                    path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Stores `results` under `label`. A label that is already taken gets a
    /// ` #2`, ` #3`, ... suffix so an earlier run is never overwritten.
    pub fn insert_run(
        &mut self,
        label: &str,
        results: &[ProbeResult],
    ) -> Result<String, HostpingError> {
        let mut unique = label.to_string();
        let mut n = 2;
        while self.runs.contains_key(&unique) {
            unique = format!("{} #{}", label, n);
            n += 1;
        }
        let value = serde_json::to_value(results)?;
        self.runs.insert(unique.clone(), value);
        Ok(unique)
    }

    pub fn save(&self, path: &Path) -> Result<(), HostpingError> {
        let json = serde_json::to_string_pretty(&self.runs)?;
        atomic_write(path, json.as_bytes()).map_err(|source| HostpingError::LogIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The most recent `n` decodable runs, oldest first.
    pub fn recent(&self, n: usize) -> Vec<(String, Vec<ProbeResult>)> {
        let mut runs: Vec<_> = self
            .runs
            .iter()
            .rev()
            .filter_map(|(label, v)| {
                serde_json::from_value::<Vec<ProbeResult>>(v.clone())
                    .ok()
                    .map(|results| (label.clone(), results))
            })
            .take(n)
            .collect();
        runs.reverse();
        runs
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
