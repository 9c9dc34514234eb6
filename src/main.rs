use clap::Parser;
use kahin_bot::config::cli::CliArgs;
use kahin_bot::utils::error::ErrorSeverity;
use kahin_bot::utils::{logger, validation::Validate};
use kahin_bot::{Dispatcher, GeminiParaphraser, LocalContentStore, TelegramClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            tracing::error!("❌ Failed to load configuration: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let _log_guard = logger::init_bot_logger(
        config.logging.verbose,
        config.logging.json,
        config.logging.file_path(),
    );

    tracing::info!("Starting kahin-bot {}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        data_dir = %config.content.data_dir.display(),
        model = %config.paraphraser.model,
        "Loaded configuration"
    );

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let telegram = Arc::new(TelegramClient::new(config.telegram.clone())?);
    let paraphraser = GeminiParaphraser::new(config.paraphraser.clone())?;
    let content = LocalContentStore::new(config.content.clone());

    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&telegram), paraphraser, content));

    if let Err(e) = dispatcher.run(telegram.as_ref()).await {
        tracing::error!(
            "❌ Bot stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    tracing::info!("👋 kahin-bot stopped");
    Ok(())
}
