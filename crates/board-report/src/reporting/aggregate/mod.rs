mod collaborators;
mod insights;
mod summary;
pub mod views;

pub use collaborators::rollup_by_collaborator;
pub use insights::generate_insights;
pub use summary::summarize;

pub(crate) use summary::StatusTally;
