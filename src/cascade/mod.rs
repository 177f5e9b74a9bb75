mod orchestrator;
mod report;

pub use orchestrator::Cascade;
pub use report::{CascadeOutput, CascadeReport};
