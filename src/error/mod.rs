mod app;
mod config;
mod http;
mod schedule;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use schedule::ScheduleError;
pub use validation::ValidationError;
