pub mod ftp;
pub mod postgres;
