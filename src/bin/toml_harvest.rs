use car_harvest::adapters::http::DEFAULT_USER_AGENT;
use car_harvest::core::{ConfigProvider, PageSource};
use car_harvest::domain::model::RunSummary;
use car_harvest::utils::error::ErrorSeverity;
use car_harvest::utils::{logger, validation::Validate};
use car_harvest::{
    FilePageSource, HarvestEngine, HarvestPipeline, HttpPageSource, LocalStorage, TomlConfig,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-harvest")]
#[command(about = "Car listing harvester driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "harvest.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the number of pages to visit
    #[arg(long)]
    max_pages: Option<usize>,

    /// Dry run - show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based harvest");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(max_pages) = args.max_pages {
        config.source.max_pages = Some(max_pages);
        tracing::info!("🔧 Max pages overridden to: {}", max_pages);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No pages will be fetched");
        perform_dry_run(&config);
        return Ok(());
    }

    let result = if config.reads_saved_pages() {
        run(config, FilePageSource).await
    } else {
        let user_agent = config.user_agent().unwrap_or(DEFAULT_USER_AGENT).to_string();
        let source = HttpPageSource::new(&user_agent, config.timeout());
        match source {
            Ok(source) => run(config, source).await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ Harvest completed successfully!");
            println!("✅ Saved {} cars -> {}", summary.cars_saved, summary.output_path);
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
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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

async fn run<P: PageSource>(config: TomlConfig, source: P) -> car_harvest::Result<RunSummary> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = HarvestPipeline::new(storage, source, config);
    HarvestEngine::new(pipeline).run().await
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Harvest: {}", config.harvest.name);
    if let Some(description) = &config.harvest.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.source.r#type);
    println!("  Pages: {}", config.page_urls().len());
    println!("  Max Cards per Page: {}", config.max_cards());
    println!("  Output: {}/{}", config.output_path(), config.snapshot_filename());
    println!("  Formats: {}", config.load.output_formats.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Pages to harvest:");
    for url in config.page_urls() {
        println!("  {}", url);
    }
    println!("  Delay between pages: {:?}", config.page_delay());
    println!("  On page failure: {:?}", config.page_failure_policy());

    println!();
    println!("🧩 Selectors:");
    let selectors = config.selectors();
    println!("  card: {}", selectors.card);
    println!("  link: {}", selectors.link);
    println!("  image: {}", selectors.image.join(" | "));
    println!("  title: {}", selectors.title);
    println!("  info: {}", selectors.info_items);
    println!("  price: {}", selectors.price);

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  Dedupe by link: {}", config.dedupe_by_link());
    println!("  CSV export: {}", config.write_csv());

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
