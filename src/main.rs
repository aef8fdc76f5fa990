use anyhow::Context;
use clap::Parser;
use leaderboard::app::render;
use leaderboard::utils::error::ErrorSeverity;
use leaderboard::utils::{logger, validation::Validate};
use leaderboard::adapters;
use leaderboard::{
    CliConfig, LeaderboardError, OutputFormat, Poller, RecordSource, RefreshCoordinator, Settings,
    Snapshot,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting leaderboard");
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    let source = adapters::source_from_config(&settings);
    tracing::info!("Reading team records from {}", source.describe());
    let coordinator = Arc::new(RefreshCoordinator::new(source));

    if settings.watch {
        watch(coordinator, &settings).await;
        return Ok(());
    }

    match coordinator.refresh().await {
        Ok(snapshot) => print_snapshot(&snapshot, settings.format)?,
        Err(e) => {
            tracing::error!(
                "❌ Refresh failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}

async fn watch(coordinator: Arc<RefreshCoordinator<Box<dyn RecordSource>>>, settings: &Settings) {
    let poller =
        Poller::from_config(Arc::clone(&coordinator), settings).with_max_ticks(settings.max_ticks);
    let format = settings.format;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let ticks = poller
        .run(shutdown, |_, outcome| {
            let printed = match outcome {
                Ok(snapshot) => print_snapshot(snapshot, format),
                Err(e) => {
                    eprintln!("{}", render::render_banner(e));
                    match coordinator.latest() {
                        Some(stale) if format == OutputFormat::Table => print_snapshot(&stale, format),
                        _ => Ok(()),
                    }
                }
            };
            if let Err(e) = printed {
                tracing::error!("Failed to print standings: {:#}", e);
            }
        })
        .await;

    tracing::info!(
        "Stopped after {} refresh attempts ({} failed)",
        ticks,
        coordinator.failure_count()
    );
}

fn print_snapshot(snapshot: &Snapshot, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print!("{}", render::render_table(snapshot)),
        OutputFormat::Json => {
            let json = render::render_json(snapshot).context("serializing standings")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn exit_code(e: &LeaderboardError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
