use super::models::ProbeResult;

/// Results of one run, in probe order. Owned by the caller and handed to the
/// log at the end; nothing else holds on to it.
#[derive(Debug, Default)]
pub struct RunState {
    results: Vec<ProbeResult>,
    interrupted: bool,
}

impl RunState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
            interrupted: false,
        }
    }

    pub fn record(&mut self, result: ProbeResult) {
        tracing::info!("Probe finished: {} is {}", result.host, result.status);
        self.results.push(result);
    }

    pub fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn reachable(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| r.status.is_reachable())
    }

    pub fn unreachable(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.status.is_reachable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Host, ProbeStatus};

    fn result(name: &str, status: ProbeStatus) -> ProbeResult {
        ProbeResult::new(
            &Host::parse(name).unwrap(),
            status,
            "2024-01-01 00:00:00".to_string(),
            String::new(),
        )
    }

    #[test]
    fn test_groups_by_reachability_keep_order() {
        let mut state = RunState::default();
        state.record(result("a", ProbeStatus::Unreachable));
        state.record(result("b", ProbeStatus::Reachable));
        state.record(result("c", ProbeStatus::Unreachable));
        state.record(result("d", ProbeStatus::Reachable));

        let up: Vec<&str> = state.reachable().map(|r| r.host.as_str()).collect();
        let down: Vec<&str> = state.unreachable().map(|r| r.host.as_str()).collect();
        assert_eq!(up, vec!["b", "d"]);
        assert_eq!(down, vec!["a", "c"]);
        assert_eq!(state.results().len(), 4);
    }
}
