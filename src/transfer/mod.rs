//! Transfer module for FTP client
//!
//! Handles the secondary data connection used to carry listing and file
//! bytes for transfer commands like RETR, STOR, and LIST.

pub mod data_channel;

pub use data_channel::DataChannel;
