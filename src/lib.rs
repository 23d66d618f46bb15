pub mod config;
pub mod decoration;
pub mod filter;
pub mod opendata;
pub mod session;
pub mod tracing;
pub mod views;
