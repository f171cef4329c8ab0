use clap::Parser;
use wiki_edit_trend::core::ConfigProvider;
use wiki_edit_trend::utils::error::ErrorSeverity;
use wiki_edit_trend::utils::{logger, validation::Validate};
use wiki_edit_trend::{EditTrendPipeline, LocalStorage, TomlConfig, TrendEngine, WikiApiClient};

#[derive(Parser)]
#[command(name = "toml-trend")]
#[command(about = "Chart wiki edit counts using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "wiki-trend.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the article title from config
    #[arg(long)]
    title: Option<String>,

    /// Dry run - show the request that would be sent without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 先載入配置，日誌格式由配置決定
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based wiki-edit-trend");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 命令列覆蓋設定
    if let Some(title) = &args.title {
        config.source.title = Some(title.clone());
        tracing::info!("🔧 Article title overridden to: {}", title);
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
        tracing::info!("🔍 DRY RUN MODE - No request will be sent");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = match EditTrendPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = TrendEngine::new(pipeline);

    match engine.run().await {
        Ok(output) => {
            println!(
                "✅ {} edits over {} days",
                output.table.total_edits(),
                output.table.len()
            );
            println!("📁 Chart saved to: {}", output.chart_path);
            if let Some(csv_path) = output.csv_path {
                println!("📁 Edit counts saved to: {}", csv_path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let chart = config.chart_settings();

    println!("📋 Configuration Summary:");
    println!("  Article: {}", config.article_title());
    println!("  Source: {}", config.api_endpoint());
    println!("  Output: {}", config.output_path());
    println!("  Chart: {} ({}x{})", config.chart_filename(), chart.width, chart.height);

    if let Some(csv) = config.csv_filename() {
        println!("  CSV: {}", csv);
    }

    if let Some(limit) = config.source.revision_limit {
        println!("  Revision Limit: {}", limit);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let query = config.revision_query();
    let client = WikiApiClient::new(config.api_endpoint())?;

    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Request:");
    println!("  GET {}", client.request_url(&query)?);
    match config.request_timeout() {
        Some(timeout) => println!("  Timeout: {:?}", timeout),
        None => println!("  Timeout: none"),
    }

    let chart = config.chart_settings();
    println!();
    println!("🖼️ Chart Layout:");
    println!("  Size: {}x{}", chart.width, chart.height);
    println!(
        "  Margins: top {}, right {}, bottom {}, left {}",
        chart.margins.top, chart.margins.right, chart.margins.bottom, chart.margins.left
    );
    println!(
        "  Plot area: {}x{}",
        chart.inner_width(),
        chart.inner_height()
    );

    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
