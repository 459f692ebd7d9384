// src/error/mod.rs
//
// Crate-wide error type. Storage errors pass through untouched.

pub mod types;

pub use types::{AppError, AppResult};
