use car_harvest::core::PageSource;
use car_harvest::domain::model::RunSummary;
use car_harvest::utils::error::ErrorSeverity;
use car_harvest::utils::{logger, validation::Validate};
use car_harvest::{
    CliConfig, FilePageSource, HarvestEngine, HarvestPipeline, HttpPageSource, LocalStorage,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting car-harvest CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = if config.uses_saved_pages() {
        run(config, FilePageSource).await
    } else {
        let source = HttpPageSource::new(&config.user_agent, config.timeout());
        match source {
            Ok(source) => run(config, source).await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(summary) => {
            println!(
                "✅ Saved {} cars from {} pages -> {}",
                summary.cars_saved, summary.pages_harvested, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Harvest failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<P: PageSource>(config: CliConfig, source: P) -> car_harvest::Result<RunSummary> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = HarvestPipeline::new(storage, source, config);
    HarvestEngine::new(pipeline).run().await
}
