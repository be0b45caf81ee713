pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetch;
pub mod server;
pub mod services;
pub mod sources;
pub mod storage;
