pub mod app_context;
pub mod cli;
pub mod config;
