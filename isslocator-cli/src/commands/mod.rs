//! CLI command handlers.

pub mod common;
pub mod init;
pub mod locate;
pub mod track;
