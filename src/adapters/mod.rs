// Adapters layer: concrete implementations of the domain ports.

pub mod content;
pub mod gemini;
pub mod telegram;
