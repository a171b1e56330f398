/// Database configuration and connection management
pub mod database;

/// Payment defaults loaded from config.toml
pub mod payment;
