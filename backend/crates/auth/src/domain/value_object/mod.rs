//! Value Objects
//!
//! Validated wrapper types for domain values.

pub mod email;
pub mod nickname;

pub use email::Email;
pub use nickname::Nickname;
