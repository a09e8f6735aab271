pub mod prize_registry;
pub mod wheel_spinner;

pub use prize_registry::*;
pub use wheel_spinner::*;
