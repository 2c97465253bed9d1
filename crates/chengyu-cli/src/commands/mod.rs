pub mod classify;
pub mod drill;
pub mod init;
pub mod sample;
