pub mod client;
pub mod config;
pub mod controller;
pub mod default_colors;
pub mod display;
pub mod error;
pub mod openlib_schema;
pub mod query;
pub mod traits;
pub mod types;
