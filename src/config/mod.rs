/// Database configuration and connection management
pub mod database;

/// Product seed configuration loading from config.toml
pub mod products;
