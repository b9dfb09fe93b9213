pub mod args;
pub mod cli_parser;
pub mod repository;

pub use args::{ArgumentList, DisplayOutput, ScheduledCommand};
pub use repository::{Branch, GitRepository, LocalState, exec_git};
