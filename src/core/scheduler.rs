use super::events::{Event, Observer};
use super::models::Host;
use super::prober::Prober;
use super::state::RunState;
use std::future::Future;
use std::time::Duration;

/// Probes `hosts` one at a time, in order. If `shutdown` resolves first, the
/// in-flight probe is dropped (its child is killed) and the remaining hosts
/// are skipped.
pub async fn execute_all<O, F>(
    prober: &Prober,
    hosts: &[Host],
    timeout: Duration,
    observer: &mut O,
    shutdown: F,
) -> RunState
where
    O: Observer + ?Sized,
    F: Future<Output = ()>,
{
    let mut state = RunState::with_capacity(hosts.len());
    tokio::pin!(shutdown);

    for (index, host) in hosts.iter().enumerate() {
        observer.on_event(Event::ProbeStarted(host));

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::warn!("Run interrupted before probing {}", host);
                state.mark_interrupted();
                observer.on_event(Event::Interrupted {
                    completed: index,
                    remaining: hosts.len() - index,
                });
                break;
            }
            result = prober.probe(host, timeout) => {
                observer.on_event(Event::ProbeFinished(&result));
                state.record(result);
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hosts::parse_host_list;
    use crate::core::models::{ProbeResult, ProbeStatus};
    use crate::core::prober::PingCommand;
    use pretty_assertions::assert_eq;
    use std::future::pending;

    #[derive(Default)]
    struct Recorder {
        started: Vec<String>,
        finished: Vec<(String, ProbeStatus)>,
        interrupted: Option<(usize, usize)>,
    }

    impl Observer for Recorder {
        fn on_event(&mut self, event: Event<'_>) {
            match event {
                Event::ProbeStarted(host) => self.started.push(host.to_string()),
                Event::ProbeFinished(ProbeResult { host, status, .. }) => {
                    self.finished.push((host.clone(), *status))
                }
                Event::Interrupted { completed, remaining } => {
                    self.interrupted = Some((completed, remaining))
                }
            }
        }
    }

    #[tokio::test]
    async fn test_empty_host_list_probes_nothing() {
        let prober = Prober::new(PingCommand::new("/nonexistent/ping"));
        let mut recorder = Recorder::default();
        let state = execute_all(&prober, &[], Duration::from_secs(1), &mut recorder, pending()).await;
        assert!(state.results().is_empty());
        assert!(recorder.started.is_empty());
    }

    #[tokio::test]
    async fn test_one_result_per_host_in_order() {
        let prober = Prober::new(PingCommand::new("/nonexistent/ping"));
        let hosts = parse_host_list("b.example, a.example, c.example");
        let mut recorder = Recorder::default();
        let state = execute_all(&prober, &hosts, Duration::from_secs(1), &mut recorder, pending()).await;

        let probed: Vec<&str> = state.results().iter().map(|r| r.host.as_str()).collect();
        assert_eq!(probed, vec!["b.example", "a.example", "c.example"]);
        assert_eq!(recorder.started, probed);
        assert_eq!(recorder.finished.len(), 3);
        assert!(!state.interrupted());
    }

    #[tokio::test]
    async fn test_shutdown_stops_run() {
        let prober = Prober::new(PingCommand::new("/nonexistent/ping"));
        let hosts = parse_host_list("a, b");
        let mut recorder = Recorder::default();
        let state = execute_all(&prober, &hosts, Duration::from_secs(1), &mut recorder, async {}).await;
        assert!(state.interrupted());
        assert!(state.results().is_empty());
        assert_eq!(recorder.interrupted, Some((0, 2)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_each_host_probed_exactly_once() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let calls = dir.path().join("calls");
        let script = dir.path().join("fake-ping");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\nfor last; do :; done\necho \"$last\" >> '{}'\n[ \"$last\" = down ] && exit 1\nexit 0\n",
                calls.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let prober = Prober::new(PingCommand::new(script.display().to_string()));
        let hosts = parse_host_list("up, down, up2");
        let state = execute_all(&prober, &hosts, Duration::from_secs(5), &mut (), pending()).await;

        assert_eq!(fs::read_to_string(&calls).unwrap(), "up\ndown\nup2\n");
        let statuses: Vec<ProbeStatus> = state.results().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![ProbeStatus::Reachable, ProbeStatus::Unreachable, ProbeStatus::Reachable]
        );
    }
}
