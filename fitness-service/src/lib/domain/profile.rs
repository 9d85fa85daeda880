pub mod errors;
pub mod metrics;
pub mod models;
pub mod ports;
pub mod service;
