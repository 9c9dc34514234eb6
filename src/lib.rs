pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{content::LocalContentStore, gemini::GeminiParaphraser, telegram::TelegramClient};
pub use config::BotConfig;
pub use core::dispatcher::Dispatcher;
pub use core::reading::Profile;
pub use utils::error::{KahinError, Result};
