//! Infrastructure Layer
//!
//! Database implementations and SQL composition.

pub mod postgres;
pub mod search_sql;

pub use postgres::PgBlogRepository;
