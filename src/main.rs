use clap::Parser;
use nhl_scrape::utils::logger;
use nhl_scrape::{CliConfig, CycleOutcome, EtlEngine, LocalStorage, NhlPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("NHL scraper live - tracking {} teams", settings.teams.len());
    tracing::debug!("Settings: {:?}", settings);

    let refresh = settings.refresh_interval();
    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = NhlPipeline::new(storage, settings)?;
    let engine = EtlEngine::new(pipeline);

    if cli.once {
        match engine.run().await {
            Ok(CycleOutcome::Saved { path, rows, leader }) => {
                println!("✅ Saved {} skaters to {}", rows, path);
                if let Some(leader) = leader {
                    println!("🏒 Leader: {}", leader);
                }
            }
            Ok(CycleOutcome::NoData) => {
                println!("No data received.");
            }
            Err(e) => {
                tracing::error!(
                    "Scrape failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());

                let exit_code = e.exit_code();
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
        }
        return Ok(());
    }

    tracing::info!("Press Ctrl+C to stop");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let cycles = engine.run_loop(refresh, None, shutdown).await;
    tracing::info!("Stopped after {} cycles", cycles);

    Ok(())
}
