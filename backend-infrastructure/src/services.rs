pub mod refresh_service;
pub mod report_service;

pub use refresh_service::*;
pub use report_service::*;
