//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod log_in;
pub mod log_out;
pub mod sign_up;
pub mod token;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use log_in::{LogInInput, LogInOutput, LogInUseCase};
pub use log_out::LogOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
