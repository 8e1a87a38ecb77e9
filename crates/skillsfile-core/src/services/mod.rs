//! Services shared by SkillsFile front ends.

mod report;
mod sync;

pub use report::{EntitySummary, SyncReport};
pub use sync::SyncService;
