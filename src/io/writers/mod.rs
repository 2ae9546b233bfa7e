pub mod jpeg;
pub mod png;
pub mod report;
