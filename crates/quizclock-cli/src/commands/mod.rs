pub mod http;
pub mod init;
pub mod run;
pub mod tcp;
pub mod validate;
