pub mod config;
pub mod logging;

pub mod catalog;
pub mod checksum;
pub mod collector;
pub mod driver;
pub mod error;
pub mod fallback;
pub mod http;
pub mod run_dir;
pub mod shell;
pub mod size;
pub mod source;
pub mod storage;
pub mod summary;
pub mod url_model;
