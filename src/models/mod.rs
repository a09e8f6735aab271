pub mod common;
pub mod prize;

pub use common::*;
pub use prize::*;
