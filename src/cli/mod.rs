//! Command Line Interface module
//!
//! - `serve`: run the HTTP facade
//! - `lyrics`, `clean`: one-shot lyrics lookup and offline extraction
//! - `movie`: one-shot movie search and details
//! - `config`: inspect or initialize configuration

pub mod clean;
pub mod config;
pub mod lyrics;
pub mod movie;
pub mod serve;
