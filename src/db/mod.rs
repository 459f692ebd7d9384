// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection providers (per-call and pooled)
// - Schema migrations
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, get_connection, get_database_path, resolve_connection_string,
    ConnectionPool, ConnectionProvider, DatabaseConnector, PoolConnector, PooledConn,
    ScopedConnection, DATABASE_ENV_VAR,
};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};
