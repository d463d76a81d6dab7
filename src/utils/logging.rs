//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! probe report.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn level_from_flags(verbose: bool, debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `RUST_LOG` can raise or lower other crates, but this crate always logs at
/// `level` so `-v`/`-d` keep working when `RUST_LOG` is set. Anything
/// `RUST_LOG` doesn't mention stays at WARN.
pub fn build_filter(level: Level) -> Result<EnvFilter> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
        .add_directive(format!("hostping={}", level).parse()?);
    Ok(filter)
}

pub fn init(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, Level::WARN)]
    #[case(true, false, Level::INFO)]
    #[case(false, true, Level::DEBUG)]
    #[case(true, true, Level::DEBUG)]
    fn test_level_from_flags(#[case] verbose: bool, #[case] debug: bool, #[case] expected: Level) {
        assert_eq!(level_from_flags(verbose, debug), expected);
    }

    #[test]
    fn test_filter_pins_crate_level() {
        let filter = build_filter(Level::DEBUG).unwrap();
        assert!(filter.to_string().contains("hostping=debug"));
    }
}
