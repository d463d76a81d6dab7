use super::progress::ProbeSpinner;
use crate::core::events::{Event, Observer};
use crate::core::models::{Host, ProbeResult, ProbeStatus};
use crate::core::state::RunState;
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

/// Prints per-probe progress to stdout while a run is underway.
pub struct ConsoleObserver {
    quiet: bool,
    spinner: ProbeSpinner,
    index: usize,
}

impl ConsoleObserver {
    pub fn new(total: usize, quiet: bool) -> Self {
        Self {
            quiet,
            spinner: ProbeSpinner::new(total),
            index: 0,
        }
    }

    fn started(&mut self, host: &Host) {
        self.index += 1;
        println!("{} {}", "Pinging".cyan().bold(), host.to_string().bold());
        self.spinner.start(self.index, host.as_str());
    }

    fn finished(&mut self, result: &ProbeResult) {
        self.spinner.finish();
        if !self.quiet {
            for line in result.detail.lines().filter(|l| !l.trim().is_empty()) {
                println!("  {}", line.dimmed());
            }
        }
        match result.status {
            ProbeStatus::Reachable => {
                println!("{} {} is reachable", "✓".green().bold(), result.host.green())
            }
            ProbeStatus::Unreachable => {
                println!("{} {} is unreachable", "✗".red().bold(), result.host.red())
            }
        }
        println!("{}", format!("Finished pinging {}", result.host).dimmed());
        println!();
    }
}

impl Observer for ConsoleObserver {
    fn on_event(&mut self, event: Event<'_>) {
        match event {
            Event::ProbeStarted(host) => self.started(host),
            Event::ProbeFinished(result) => self.finished(result),
            Event::Interrupted { completed, remaining } => {
                self.spinner.finish();
                println!(
                    "\n{} {}",
                    "⚠".yellow().bold(),
                    format!(
                        "Interrupted: {} probed, {} skipped. Saving partial results...",
                        completed, remaining
                    )
                    .yellow()
                );
            }
        }
    }
}

pub fn results_table(results: &[ProbeResult]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Host").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Loss").add_attribute(Attribute::Bold),
        Cell::new("Avg RTT").add_attribute(Attribute::Bold),
        Cell::new("Started").add_attribute(Attribute::Bold),
    ]);

    for result in results {
        let status = match result.status {
            ProbeStatus::Reachable => Cell::new("✓ reachable").fg(Color::Green),
            ProbeStatus::Unreachable => Cell::new("✗ unreachable").fg(Color::Red),
        };
        let loss = result
            .stats
            .packet_loss
            .map(|l| format!("{}%", l))
            .unwrap_or_else(|| "-".to_string());
        let rtt = result
            .stats
            .avg_rtt_ms
            .map(|r| format!("{:.1} ms", r))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&result.host),
            status,
            Cell::new(loss),
            Cell::new(rtt),
            Cell::new(&result.timestamp),
        ]);
    }

    table.to_string()
}

pub fn print_summary(state: &RunState) {
    println!("{}", "═══════════════════════════════════════".green().bold());
    println!("{}", "Ping Summary".green().bold());
    println!("{}", "═══════════════════════════════════════".green().bold());

    println!("{}", results_table(state.results()));

    let reachable: Vec<&str> = state.reachable().map(|r| r.host.as_str()).collect();
    let unreachable: Vec<&str> = state.unreachable().map(|r| r.host.as_str()).collect();

    println!("\n{} ({})", "Reachable hosts:".green().bold(), reachable.len());
    for host in &reachable {
        println!("  • {}", host.green());
    }
    println!("{} ({})", "Unreachable hosts:".red().bold(), unreachable.len());
    for host in &unreachable {
        println!("  • {}", host.red());
    }
}

pub fn print_history(runs: &[(String, Vec<ProbeResult>)]) {
    if runs.is_empty() {
        println!("{}", "No runs recorded yet.".yellow());
        return;
    }
    for (label, results) in runs {
        let up = results.iter().filter(|r| r.status.is_reachable()).count();
        println!(
            "\n{} {}",
            label.cyan().bold(),
            format!("({}/{} reachable)", up, results.len()).dimmed()
        );
        println!("{}", results_table(results));
    }
}

pub fn print_saved(label: &str, path: &std::path::Path) {
    println!(
        "\n{}",
        format!("Results saved to {} under \"{}\"", path.display(), label).dimmed()
    );
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠ Warning:".yellow().bold(), message.yellow());
}

pub fn print_notice(message: &str) {
    println!("{}", message.yellow());
}
