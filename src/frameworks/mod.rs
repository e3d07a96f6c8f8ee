// Frameworks layer: configuration and process bootstrap.

pub mod cli;
pub mod config;
