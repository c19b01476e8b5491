pub mod analyze;
mod command_result;
pub mod helper;
pub mod init;
pub mod optimize;

pub use command_result::*;
