//! DigestiGo core: turns free-text gut health notes into replies and log cards.

pub mod brain;
pub mod config;
pub mod error;
pub mod journal;

#[cfg(test)]
mod tests;

pub use brain::{DigestiBot, LogCard, ResponseResult};
pub use config::AppConfig;
pub use error::AppError;
pub use journal::{Journal, LogEntry};
