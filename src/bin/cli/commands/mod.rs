pub mod init;
pub mod lists;
pub mod settings;
pub mod study;
pub mod transfer;
pub mod words;
