pub mod client;
pub mod commands;
mod database;
pub mod environment;
