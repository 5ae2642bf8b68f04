/// HTTP request handlers (REST API)
pub mod auth;

// Re-export handlers for easy access
pub use auth::{login, logout, me, reissue, sign_up, LogoutResponse};
