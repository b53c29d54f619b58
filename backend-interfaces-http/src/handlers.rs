pub mod admin_handlers;
pub mod auth_handlers;
pub mod cashier_handlers;
pub mod concierge_handlers;
pub mod ops_handlers;
pub mod student_handlers;

pub use admin_handlers::*;
pub use auth_handlers::*;
pub use cashier_handlers::*;
pub use concierge_handlers::*;
pub use ops_handlers::*;
pub use student_handlers::*;
