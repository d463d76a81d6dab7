use crate::{
    cli::{args::Cli, prompt},
    config::{ConfigLoader, GlobalConfig},
    core::{
        hosts::{parse_host_list, predefined_hosts},
        models::Host,
        prober::Prober,
        scheduler,
    },
    executors::toolchain,
    storage::{self, RunLog},
    ui::printer::{self, ConsoleObserver},
    utils::logging,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one run after merging CLI flags over the config file.
#[derive(Debug, Clone)]
struct RunSettings {
    timeout: Duration,
    log_path: PathBuf,
}

impl RunSettings {
    fn resolve(cli: &Cli, config: &GlobalConfig) -> Self {
        Self {
            timeout: cli
                .timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.ping.timeout()),
            log_path: cli
                .log_path
                .clone()
                .unwrap_or_else(|| config.log.path.clone()),
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let level = logging::level_from_flags(cli.verbose, cli.debug);
    logging::init(level)?;

    let config = ConfigLoader::load_with_custom_path(cli.config.as_deref())?;
    let settings = RunSettings::resolve(&cli, &config);
    tracing::info!(
        "Timeout {:?}, log {:?}, ping program {:?}",
        settings.timeout,
        settings.log_path,
        config.ping.program
    );

    if let Some(count) = cli.history {
        let log = RunLog::load(&settings.log_path);
        printer::print_history(&log.recent(count as usize));
        return Ok(());
    }

    let hosts = select_hosts(&cli, &config)?;
    if hosts.is_empty() {
        printer::print_notice("No hosts provided. Nothing to ping, exiting.");
        return Ok(());
    }
    tracing::info!("Probing {} hosts", hosts.len());

    if toolchain::locate(&config.ping.program).is_none() {
        printer::print_warning(&format!(
            "'{}' was not found on PATH; every host will be reported unreachable",
            config.ping.program
        ));
    }

    let prober = Prober::from_config(&config.ping);
    let mut observer = ConsoleObserver::new(hosts.len(), cli.quiet);
    let state = scheduler::execute_all(
        &prober,
        &hosts,
        settings.timeout,
        &mut observer,
        shutdown_signal(),
    )
    .await;

    printer::print_summary(&state);

    if cli.no_save {
        tracing::info!("--no-save given, run log left untouched");
        return Ok(());
    }
    if state.results().is_empty() {
        printer::print_notice("No hosts were probed; run log left untouched.");
        return Ok(());
    }

    match storage::append_run(&settings.log_path, state.results()) {
        Ok(label) => printer::print_saved(&label, &settings.log_path),
        Err(e) => {
            tracing::warn!("Failed to save run: {}", e);
            printer::print_warning(&format!("results were not saved: {}", e));
        }
    }

    Ok(())
}

fn select_hosts(cli: &Cli, config: &GlobalConfig) -> Result<Vec<Host>> {
    if let Some(list) = &cli.hosts {
        return Ok(parse_host_list(list));
    }
    if cli.predefined {
        return Ok(predefined_hosts(config.hosts.predefined.as_slice()));
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let use_predefined =
        prompt::ask_use_predefined(&mut input, &mut output).context("Failed to read answer")?;
    if use_predefined {
        return Ok(predefined_hosts(config.hosts.predefined.as_slice()));
    }
    let list = prompt::ask_host_list(&mut input, &mut output).context("Failed to read host list")?;
    Ok(parse_host_list(&list))
}

/// Resolves on Ctrl+C. If the handler cannot be installed the run simply
/// can't be interrupted.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C signal");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from(["hostping", "--timeout", "9", "--log-path", "/tmp/x.json"]).unwrap();
        let settings = RunSettings::resolve(&cli, &GlobalConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs(9));
        assert_eq!(settings.log_path, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn test_config_defaults_apply() {
        let cli = Cli::try_parse_from(["hostping"]).unwrap();
        let settings = RunSettings::resolve(&cli, &GlobalConfig::default());
        assert_eq!(settings.timeout, Duration::from_secs(4));
        assert_eq!(settings.log_path, PathBuf::from("ping_log.txt"));
    }

    #[test]
    fn test_select_hosts_from_flag() {
        let cli = Cli::try_parse_from(["hostping", "--hosts", "google.com, , bing.com"]).unwrap();
        let hosts = select_hosts(&cli, &GlobalConfig::default()).unwrap();
        let names: Vec<&str> = hosts.iter().map(Host::as_str).collect();
        assert_eq!(names, vec!["google.com", "bing.com"]);
    }

    #[test]
    fn test_select_predefined() {
        let cli = Cli::try_parse_from(["hostping", "--predefined"]).unwrap();
        let hosts = select_hosts(&cli, &GlobalConfig::default()).unwrap();
        assert_eq!(hosts.len(), 5);
        assert_eq!(hosts[4].as_str(), "10.255.255.1");
    }

    #[tokio::test]
    async fn test_blank_hosts_skip_probe_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("ping_log.txt");
        let cli = Cli::try_parse_from([
            "hostping",
            "--hosts",
            " , ,",
            "--log-path",
            log.to_str().unwrap(),
            "--config",
            write_config(&dir).to_str().unwrap(),
        ])
        .unwrap();

        run(cli).await.unwrap();
        assert!(!log.exists());
    }

    fn write_config(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("hostping.toml");
        std::fs::write(&path, "[ping]\nprogram = \"/nonexistent/ping\"\n").unwrap();
        path
    }
}
