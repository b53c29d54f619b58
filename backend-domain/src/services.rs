// Domain services

pub mod catering;
pub mod throttle;

pub use catering::*;
pub use throttle::*;
