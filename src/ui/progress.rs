use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a single ping is in flight. Draws to stderr and
/// stays hidden when stderr is not a terminal.
pub struct ProbeSpinner {
    bar: Option<ProgressBar>,
    total: usize,
}

impl ProbeSpinner {
    pub fn new(total: usize) -> Self {
        Self { bar: None, total }
    }

    pub fn start(&mut self, index: usize, host: &str) {
        self.finish();
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} [{prefix}] {msg} {elapsed}") {
            bar.set_style(style);
        }
        bar.set_prefix(format!("{}/{}", index, self.total));
        bar.set_message(format!("pinging {}", host));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ProbeSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}
