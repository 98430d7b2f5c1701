//! Small shared helpers

pub mod math;
pub mod time;
