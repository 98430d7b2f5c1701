//! CMS Usage Statistics Reporter
//!

pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod processor;
pub mod snapshot;
pub mod stats;
pub mod types;
pub mod utils;
