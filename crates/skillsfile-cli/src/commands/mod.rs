pub mod achieve;
pub mod common;
pub mod completions;
pub mod config;
pub mod list;
pub mod reset;
pub mod status;
pub mod sync;
