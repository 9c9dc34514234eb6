pub mod chunker;
pub mod dispatcher;
pub mod life_path;
pub mod pin_code;
pub mod reading;
pub mod reducer;
pub mod render;
pub mod report;
pub mod session;
pub mod zodiac;

pub use crate::domain::model::{Birthdate, ContentKey, LifePath, PinCode, ZodiacAssignment};
pub use crate::domain::ports::{ChatTransport, ContentStore, EventSource, Paraphraser};
pub use crate::utils::error::Result;
