use crate::config::BotConfig;
use crate::core::report::ReportMethod;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kahin-bot", version)]
#[command(about = "Telegram bot serving life path, pin code and enneagram readings")]
pub struct CliArgs {
    /// TOML config file. Without it the config is read from the environment.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the content data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Also write logs to this file (rotated daily)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn load_config(&self) -> Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::from_file(path)?,
            None => BotConfig::from_env()?,
        };

        if let Some(data_dir) = &self.data_dir {
            config.content.data_dir = data_dir.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
        config.logging.json |= self.json_logs;
        config.logging.verbose |= self.verbose;

        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "kahin-report", version)]
#[command(about = "Writes numerology reports for the given birthdates")]
pub struct ReportArgs {
    /// Birthdates in DD.MM.YYYY format; prompted for when omitted
    #[arg(short = 'b', long = "birthdate", visible_alias = "birthdates", num_args = 1..)]
    pub birthdates: Vec<String>,

    #[arg(short, long, value_enum, default_value = "millman")]
    pub method: ReportMethod,

    #[arg(short = 'd', long = "data-dir", visible_alias = "data-directory", default_value = "./data")]
    pub data_dir: PathBuf,

    #[arg(short = 'r', long = "reports-dir", visible_alias = "reports-directory", default_value = "./reports")]
    pub reports_dir: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
