// src/lib.rs
// Tabloid - blog and tag data access over SQLite
//
// Architecture:
// - Repositories are dumb data mappers over explicit, parameterized SQL
// - Every repository call opens its own connection and releases it on return
// - Storage errors propagate untouched; absence is `None` or a no-op

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{Blog, Post, Tag};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{
    create_connection_pool, initialize_database, resolve_connection_string, ConnectionPool,
    ConnectionProvider, DatabaseConnector, PoolConnector,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    BlogRepository, PostRepository, Repository, SqliteBlogRepository, SqlitePostRepository,
    SqliteTagRepository,
};
