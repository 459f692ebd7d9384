// src/domain/mod.rs
//
// Domain entities. Plain data: no validation happens at this layer, the
// store's constraints are the only gate.

pub mod blog;
pub mod post;
pub mod tag;

pub use blog::Blog;
pub use post::Post;
pub use tag::Tag;
