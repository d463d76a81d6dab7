use super::models::{Host, ProbeResult};

#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    ProbeStarted(&'a Host),
    ProbeFinished(&'a ProbeResult),
    Interrupted { completed: usize, remaining: usize },
}

/// Receives progress while a run is underway. Presentation only: nothing an
/// observer does can change a probe's result.
pub trait Observer {
    fn on_event(&mut self, event: Event<'_>);
}

/// Discards every event.
impl Observer for () {
    fn on_event(&mut self, _event: Event<'_>) {}
}
