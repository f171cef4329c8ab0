use clap::Parser;
use wiki_edit_trend::config::LogFormat;
use wiki_edit_trend::utils::error::ErrorSeverity;
use wiki_edit_trend::utils::{logger, validation::Validate};
use wiki_edit_trend::{CliConfig, EditTrendPipeline, LocalStorage, TrendEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting wiki-edit-trend CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("📄 Article: {}", config.title);

    let storage = LocalStorage::new(config.output_path.clone());
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

            // 依嚴重程度決定退出碼
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
