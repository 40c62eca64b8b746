pub mod calculate;
pub mod program;
pub mod schedule;
