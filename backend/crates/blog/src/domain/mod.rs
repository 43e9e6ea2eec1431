//! Domain Layer
//!
//! Entities, search query model and repository traits.

pub mod entity;
pub mod repository;
pub mod search;
