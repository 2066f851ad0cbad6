mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hudsync_core::context::{self, HudContext};
use hudsync_types::AlertOrdering;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::script::{Replay, ReplayError, Script};

#[derive(Parser)]
#[command(version, about = "Replay a HUD alert script and print every UI operation")]
struct Cli {
    /// JSON script to replay
    script: PathBuf,

    /// Builtin catalog directory (overrides config)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// User catalog directory (overrides config)
    #[arg(long)]
    custom: Option<PathBuf>,

    /// Placement policy for new alerts (overrides config)
    #[arg(long, value_enum)]
    ordering: Option<OrderingArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderingArg {
    Catalog,
    Arrival,
}

impl From<OrderingArg> for AlertOrdering {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::Catalog => AlertOrdering::Catalog,
            OrderingArg::Arrival => AlertOrdering::Arrival,
        }
    }
}

/// Initialize logging, writing to HUDSYNC_LOG_DIR if set, otherwise stderr.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(dir) = std::env::var("HUDSYNC_LOG_DIR") {
        let appender = tracing_appender::rolling::never(dir, "hudsync-replay.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn run(cli: Cli) -> Result<(), ReplayError> {
    let mut config = context::load_config();
    if let Some(dir) = cli.catalog {
        config.builtin_catalog_dir = Some(dir);
    }
    if let Some(dir) = cli.custom {
        config.custom_catalog_dir = Some(dir);
    }
    if let Some(ordering) = cli.ordering {
        config.alert_ordering = ordering.into();
    }

    let context = HudContext::load(config)?;
    let script = Script::load(&cli.script)?;
    tracing::info!(
        frames = script.frames.len(),
        alerts = context.codec().len(),
        "Replaying script"
    );

    let mut replay = Replay::new(context);
    for frame in &script.frames {
        for line in replay.step(frame)? {
            println!("{line}");
        }
    }

    let alerts = replay.client().alerts();
    println!(
        "{} alerts shown, {} active",
        alerts.len(),
        alerts.active_alert_count()
    );
    Ok(())
}

fn main() -> ExitCode {
    let _guard = init_logging();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Replay failed");
            ExitCode::FAILURE
        }
    }
}
