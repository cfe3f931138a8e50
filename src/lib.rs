//! MCP server exposing NWS weather alerts and OpenWeatherMap current
//! conditions as tools.

pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod handlers;
pub mod models;
pub mod retry;
pub mod service;
pub mod tools;

pub use config::Config;
pub use service::Weather;
