// Backend Application Layer

pub mod cache;
pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod state;
pub mod token;

pub use cache::TabCache;
pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
