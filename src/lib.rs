pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod facet;
pub mod models;
pub mod search;
pub mod user_agent;
