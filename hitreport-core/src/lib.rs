pub mod access_log;
pub mod cli;
pub mod conf;
pub mod logging;
pub mod source;
