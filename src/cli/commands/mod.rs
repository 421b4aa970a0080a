//! Subcommands of the `sheetforge` binary

pub mod export;
pub mod init;
pub mod status;
pub mod validate;
