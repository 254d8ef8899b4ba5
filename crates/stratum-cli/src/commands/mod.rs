//! One module per subcommand.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod modules;
