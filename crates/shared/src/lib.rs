pub mod catalog;
pub mod chat;
pub mod config;
mod config_env;
pub mod loaders;
pub mod models;
