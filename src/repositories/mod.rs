// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are DUMB data mappers
// - NO business logic, NO input validation
// - NO cross-repository calls
// - One connection per call, released before returning
// - Explicit SQL only, always parameterized

pub mod blog_repository;
pub mod post_repository;
pub mod tag_repository;

pub use blog_repository::{BlogRepository, SqliteBlogRepository};
pub use post_repository::{PostRepository, SqlitePostRepository};
pub use tag_repository::SqliteTagRepository;

use crate::error::AppResult;

/// CRUD capability over one entity type.
///
/// Absence is never an error: `get` returns `None`, and `update`/`delete`
/// on a missing id succeed without touching anything.
pub trait Repository<T>: Send + Sync {
    fn get(&self, id: i64) -> AppResult<Option<T>>;

    /// No ordering guarantee.
    fn get_all(&self) -> AppResult<Vec<T>>;

    /// Writes the store-generated id back into `entity`.
    fn insert(&self, entity: &mut T) -> AppResult<()>;

    fn update(&self, entity: &T) -> AppResult<()>;

    fn delete(&self, id: i64) -> AppResult<()>;
}
