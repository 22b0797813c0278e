pub mod check;
pub mod demo;
pub mod generate;
pub mod init;
