//! Command handlers, one module per subcommand group

pub mod config;
pub mod export;
pub mod note;
pub mod project;
pub mod topic;
