use crate::config::DEFAULT_LOG_FILE;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kahin_bot=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kahin_bot=info"))
    }
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Bot logging. With a log file the output goes through a daily rolling,
/// non-blocking appender; the returned guard must live as long as the process.
pub fn init_bot_logger(verbose: bool, json: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let registry = tracing_subscriber::registry().with(default_filter(verbose));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(DEFAULT_LOG_FILE);
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            if json {
                registry
                    .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                    .init();
            } else {
                registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_ansi(false)
                            .with_line_number(true)
                            .with_writer(writer),
                    )
                    .init();
            }
            Some(guard)
        }
        None => {
            if json {
                registry.with(tracing_subscriber::fmt::layer().json()).init();
            } else {
                registry
                    .with(tracing_subscriber::fmt::layer().with_target(false).compact())
                    .init();
            }
            None
        }
    }
}
