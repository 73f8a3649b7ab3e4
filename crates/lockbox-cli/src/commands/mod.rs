pub mod files;
pub mod init;
pub mod misc;
pub mod notes;
pub mod records;
